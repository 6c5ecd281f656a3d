//! Login screen.

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
use crate::api::Credentials;
use crate::tui::input::TextField;
use crate::tui::screen::{AppContext, Screen, ScreenTransition};
use crate::tui::ui;

/// Username and password form.
#[derive(Debug)]
pub struct LoginScreen {
    fields: [TextField; 2],
    focus: usize,
    show_password: bool,
    error: Option<String>,
    success: Option<String>,
    redirect_at: Option<Instant>,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self {
            fields: [TextField::new("Username"), TextField::masked("Password")],
            focus: 0,
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

        let credentials = Credentials::new(
            self.fields[0].value().to_string(),
            self.fields[1].value().to_string(),
        );
        let result = ctx.api().login(&credentials).await;
        match result {
            Ok(profile) => {
                info!(username = %profile.username(), "Login accepted");
                self.success = Some(format!("Welcome, {}!", profile.username()));
                ctx.session_mut().sign_in(profile);
                ctx.set_server_available(true);
                self.redirect_at = Some(Instant::now() + REDIRECT_DELAY);
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                ctx.note_error(&e);
                self.error = Some(e.message());
            }
        }
    }
}

#[async_trait(?Send)]
impl Screen for LoginScreen {
    fn render(&self, frame: &mut Frame, ctx: &AppContext) {
        let [title, body, status, help] = ui::frame_layout(frame.area());
        ui::draw_title(frame, title, "RapidRead - Sign in");

        let form = ui::center_rect(body, 50, 6);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3)])
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

        if let Some(err) = &self.error {
            ui::draw_status(frame, status, err, true);
        } else if let Some(msg) = &self.success {
            ui::draw_status(frame, status, msg, false);
        } else if !*ctx.server_available() {
            let msg = format!("Server unavailable at {}", ctx.api().base_url());
            ui::draw_status(frame, status, &msg, true);
        } else {
            ui::draw_status(frame, status, "Enter your credentials", false);
        }

        ui::draw_help(
            frame,
            help,
            "Tab: Next field | Enter: Sign in | Ctrl+V: Show password | Ctrl+R: Register | Esc: Quit",
        );
    }

    #[instrument(skip(self, key, ctx))]
    async fn handle_key(&mut self, key: KeyEvent, ctx: &mut AppContext) -> ScreenTransition {
        if self.redirect_at.is_some() {
            return ScreenTransition::Stay;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => ScreenTransition::Quit,
            KeyCode::Char('r') if ctrl => ScreenTransition::GoToRegister,
            KeyCode::Char('v') if ctrl => {
                self.show_password = !self.show_password;
                self.fields[1].set_masked(!self.show_password);
                ScreenTransition::Stay
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Up | KeyCode::BackTab => {
                self.focus = (self.focus + 1) % self.fields.len();
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
                ScreenTransition::GoToHome
            }
            _ => ScreenTransition::Stay,
        }
    }
}
