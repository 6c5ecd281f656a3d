//! Terminal UI: sign-in flow, reading helper and the two games.

mod controller;
mod input;
mod markup;
mod screen;
mod screens;
mod ui;

pub use controller::AppController;
pub use input::{TextField, digit_position, move_cursor};
pub use markup::{Segment, parse as parse_markup, to_text as markup_to_text};
pub use screen::{AppContext, Screen, ScreenTransition};
pub use screens::{
    HigherLowerScreen, HomeScreen, LoginScreen, REDIRECT_DELAY, RegisterScreen,
    TextProcessorScreen, TicTacToeScreen,
};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::{error, info};

use crate::api::ApiClient;
use crate::config::AppConfig;

/// Log file written while the TUI owns the terminal.
pub const LOG_FILE: &str = "rapidread_tui.log";

/// Runs the TUI until the user quits.
pub async fn run_tui(config: AppConfig) -> Result<()> {
    // Log to a file to avoid interfering with the TUI.
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(api_url = %config.api_url(), text_api_url = %config.text_api_base(), "Starting RapidRead TUI");

    let api = ApiClient::from_config(&config)?;
    let mut controller = AppController::new(AppContext::new(api, config));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = controller.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "App loop error");
    }
    res
}
