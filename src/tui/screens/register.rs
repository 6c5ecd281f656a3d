//! Registration screen.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use tokio::time::Instant;
use tracing::{info, instrument, warn};

use super::REDIRECT_DELAY;
use crate::api::NewAccount;
use crate::tui::input::TextField;
use crate::tui::screen::{AppContext, Screen, ScreenTransition};
use crate::tui::ui;

const USERNAME: usize = 0;
const EMAIL: usize = 1;
const PASSWORD: usize = 2;

/// New account form.
#[derive(Debug)]
pub struct RegisterScreen {
    fields: [TextField; 3],
    focus: usize,
    show_password: bool,
    error: Option<String>,
    success: Option<String>,
    redirect_at: Option<Instant>,
}

impl Default for RegisterScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterScreen {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self {
            fields: [
                TextField::new("Username"),
                TextField::new("Email"),
                TextField::masked("Password"),
            ],
            focus: USERNAME,
            show_password: false,
            error: None,
            success: None,
            redirect_at: None,
        }
    }

    #[instrument(skip(self, ctx))]
    async fn submit(&mut self, ctx: &mut AppContext) {
        self.error = None;
        self.success = None;

        if !*ctx.server_available() {
            let available = ctx.api().check_server().await;
            ctx.set_server_available(available);
        }
        if !*ctx.server_available() {
            self.error = Some(format!(
                "Server unavailable. Check that it is running at {}",
                ctx.api().base_url()
            ));
            return;
        }

        let account = NewAccount::new(
            self.fields[USERNAME].value().to_string(),
            self.fields[EMAIL].value().to_string(),
            self.fields[PASSWORD].value().to_string(),
        );
        let result = ctx.api().register(&account).await;
        match result {
            Ok(()) => {
                info!("Registration accepted");
                self.success = Some("Account created. Redirecting to sign in...".to_string());
                self.redirect_at = Some(Instant::now() + REDIRECT_DELAY);
            }
            Err(e) => {
                warn!(error = %e, "Registration failed");
                ctx.note_error(&e);
                self.error = Some(e.message());
            }
        }
    }
}

#[async_trait(?Send)]
impl Screen for RegisterScreen {
    fn render(&self, frame: &mut Frame, _ctx: &AppContext) {
        let [title, body, status, help] = ui::frame_layout(frame.area());
        ui::draw_title(frame, title, "RapidRead - Create account");

        let form = ui::center_rect(body, 50, 9);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(form);
        for (i, field) in self.fields.iter().enumerate() {
            let border = if i == self.focus {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let widget = Paragraph::new(field.display()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(field.label()),
            );
            frame.render_widget(widget, rows[i]);
        }

        match (&self.error, &self.success) {
            (Some(err), _) => ui::draw_status(frame, status, err, true),
            (None, Some(msg)) => ui::draw_status(frame, status, msg, false),
            (None, None) => ui::draw_status(
                frame,
                status,
                "Password: 6+ characters, username: 3+ characters",
                false,
            ),
        }

        ui::draw_help(
            frame,
            help,
            "Tab: Next field | Enter: Register | Ctrl+V: Show password | Esc: Back to sign in",
        );
    }

    #[instrument(skip(self, key, ctx))]
    async fn handle_key(&mut self, key: KeyEvent, ctx: &mut AppContext) -> ScreenTransition {
        if self.redirect_at.is_some() {
            return ScreenTransition::Stay;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => ScreenTransition::GoToLogin,
            KeyCode::Char('v') if ctrl => {
                self.show_password = !self.show_password;
                self.fields[PASSWORD].set_masked(!self.show_password);
                ScreenTransition::Stay
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.fields.len();
                ScreenTransition::Stay
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                self.submit(ctx).await;
                ScreenTransition::Stay
            }
            _ => {
                self.fields[self.focus].handle(key);
                ScreenTransition::Stay
            }
        }
    }

    fn tick(&mut self, _ctx: &mut AppContext) -> ScreenTransition {
        match self.redirect_at {
            Some(at) if Instant::now() >= at => {
                self.redirect_at = None;
                ScreenTransition::GoToLogin
            }
            _ => ScreenTransition::Stay,
        }
    }
}
