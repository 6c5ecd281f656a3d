//! Screen trait, transition type and shared context for the app state machine.

use async_trait::async_trait;
use crossterm::event::KeyEvent;
use derive_getters::Getters;
use ratatui::Frame;

use crate::api::{ApiClient, ApiError};
use crate::config::AppConfig;
use crate::session::Session;

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] and [`Screen::tick`] to
/// drive the [`AppController`](super::AppController) state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Navigate to the login screen.
    GoToLogin,
    /// Navigate to the registration screen.
    GoToRegister,
    /// Navigate to the home menu.
    GoToHome,
    /// Navigate to the text processor.
    GoToTextProcessor,
    /// Navigate to tic-tac-toe.
    GoToTicTacToe,
    /// Navigate to higher/lower.
    GoToHigherLower,
    /// Sign out and return to login.
    LogOut,
    /// Exit the application.
    Quit,
}

impl ScreenTransition {
    /// True for destinations behind the login gate.
    pub fn requires_auth(self) -> bool {
        matches!(
            self,
            Self::GoToHome | Self::GoToTextProcessor | Self::GoToTicTacToe | Self::GoToHigherLower
        )
    }
}

/// State shared by every screen.
#[derive(Debug, Getters)]
pub struct AppContext {
    api: ApiClient,
    config: AppConfig,
    session: Session,
    server_available: bool,
}

impl AppContext {
    /// Creates a signed-out context.
    pub fn new(api: ApiClient, config: AppConfig) -> Self {
        Self {
            api,
            config,
            session: Session::new(),
            server_available: true,
        }
    }

    /// Mutable access to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Records the outcome of a reachability check.
    pub fn set_server_available(&mut self, available: bool) {
        self.server_available = available;
    }

    /// Marks the server unreachable when `err` was a transport failure.
    pub fn note_error(&mut self, err: &ApiError) {
        if err.is_unavailable() {
            self.server_available = false;
        }
    }
}

/// Trait implemented by each screen in the app state machine.
///
/// Each screen owns its own state, renders its UI, and handles key events.
/// The controller calls these methods in the event loop.
#[async_trait(?Send)]
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, ctx: &AppContext);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    async fn handle_key(&mut self, key: KeyEvent, ctx: &mut AppContext) -> ScreenTransition;

    /// Called once per loop iteration to process deferred work.
    fn tick(&mut self, _ctx: &mut AppContext) -> ScreenTransition {
        ScreenTransition::Stay
    }
}
