//! App controller: the state machine driving the multi-screen TUI.

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument, warn};

use crate::tui::screen::{AppContext, Screen, ScreenTransition};
use crate::tui::screens::{
    HigherLowerScreen, HomeScreen, LoginScreen, RegisterScreen, TextProcessorScreen,
    TicTacToeScreen,
};

/// Active screen in the app state machine.
#[derive(Debug)]
pub(crate) enum ActiveScreen {
    Login(LoginScreen),
    Register(RegisterScreen),
    Home(HomeScreen),
    TextProcessor(TextProcessorScreen),
    TicTacToe(TicTacToeScreen),
    HigherLower(HigherLowerScreen),
}

impl ActiveScreen {
    fn screen(&self) -> &dyn Screen {
        match self {
            Self::Login(s) => s,
            Self::Register(s) => s,
            Self::Home(s) => s,
            Self::TextProcessor(s) => s,
            Self::TicTacToe(s) => s,
            Self::HigherLower(s) => s,
        }
    }

    fn screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Login(s) => s,
            Self::Register(s) => s,
            Self::Home(s) => s,
            Self::TextProcessor(s) => s,
            Self::TicTacToe(s) => s,
            Self::HigherLower(s) => s,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Register(_) => "register",
            Self::Home(_) => "home",
            Self::TextProcessor(_) => "text_processor",
            Self::TicTacToe(_) => "tictactoe",
            Self::HigherLower(_) => "higher_lower",
        }
    }
}

/// Controller that drives the app state machine.
///
/// Call [`AppController::run`] to start the event loop.
#[derive(Debug)]
pub struct AppController {
    ctx: AppContext,
}

impl AppController {
    /// Creates a controller around `ctx`.
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Shared state.
    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Runs the event loop until the user quits.
    ///
    /// Checks the backend once, then renders, dispatches keys, applies
    /// transitions and drains deferred game events every iteration.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend + std::io::Write>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting app event loop");

        let available = self.ctx.api().check_server().await;
        self.ctx.set_server_available(available);

        let mut screen = ActiveScreen::Login(LoginScreen::new());

        loop {
            terminal.draw(|f| screen.screen().render(f, &self.ctx))?;

            // Poll for input with short timeout to keep the loop responsive.
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
            {
                let transition = screen.screen_mut().handle_key(key, &mut self.ctx).await;
                screen = match self.apply_transition(transition, screen) {
                    Some(next) => next,
                    None => {
                        info!("App quitting");
                        return Ok(());
                    }
                };
            }

            let transition = screen.screen_mut().tick(&mut self.ctx);
            screen = match self.apply_transition(transition, screen) {
                Some(next) => next,
                None => return Ok(()),
            };

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    ///
    /// Protected destinations redirect to login while signed out.
    #[instrument(skip(self, current), fields(from = current.name()))]
    pub(crate) fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        if transition == ScreenTransition::Stay {
            return Some(current);
        }
        debug!(transition = ?transition, "Applying screen transition");

        if transition.requires_auth() && !self.ctx.session().is_authenticated() {
            warn!(transition = ?transition, "Not signed in, redirecting to login");
            return Some(ActiveScreen::Login(LoginScreen::new()));
        }

        let next = match transition {
            ScreenTransition::Stay => current,
            ScreenTransition::GoToLogin => ActiveScreen::Login(LoginScreen::new()),
            ScreenTransition::GoToRegister => ActiveScreen::Register(RegisterScreen::new()),
            ScreenTransition::GoToHome => ActiveScreen::Home(HomeScreen::new()),
            ScreenTransition::GoToTextProcessor => {
                ActiveScreen::TextProcessor(TextProcessorScreen::new())
            }
            ScreenTransition::GoToTicTacToe => {
                ActiveScreen::TicTacToe(TicTacToeScreen::new(self.ctx.config()))
            }
            ScreenTransition::GoToHigherLower => {
                ActiveScreen::HigherLower(HigherLowerScreen::new(self.ctx.config()))
            }
            ScreenTransition::LogOut => {
                self.ctx.session_mut().sign_out();
                ActiveScreen::Login(LoginScreen::new())
            }
            ScreenTransition::Quit => return None,
        };
        info!(to = next.name(), "Screen changed");
        Some(next)
    }
}
