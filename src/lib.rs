//! RapidRead library - reading helper and two small games
//!
//! The game logic is pure and synchronous: each controller takes an event
//! and returns the effect the caller must carry out, such as scheduling a
//! delayed CPU reply. The shell around it talks to the HTTP backends and
//! drives a ratatui terminal app.
//!
//! # Architecture
//!
//! - **Games**: tic-tac-toe against a greedy CPU, higher/lower sessions
//! - **History**: append-only log of finished rounds
//! - **Scheduler**: cancellable deferred events on tokio
//! - **API**: login, registration and text processing over HTTP
//! - **TUI**: screen state machine behind a login gate
//!
//! # Example
//!
//! ```
//! use rapidread::games::tictactoe::{Effect, Event, Position, TicTacToeController};
//! use std::time::Duration;
//!
//! let mut game = TicTacToeController::seeded(Duration::from_millis(500), 1);
//! let effect = game.apply(Event::CellSelected(Position::Center));
//! assert!(matches!(effect, Effect::ScheduleOpponent { .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Module declarations
pub mod api;
mod config;
mod events;
pub mod games;
mod history;
mod schedule;
mod session;
pub mod tui;

// Crate-level exports - Configuration
pub use config::{API_URL_ENV, AppConfig, ConfigError, TEXT_API_URL_ENV};

// Crate-level exports - HTTP client
pub use api::{
    ApiClient, ApiError, ApiErrorKind, Credentials, NewAccount, UserProfile, ValidationError,
};

// Crate-level exports - Shell plumbing
pub use events::Observers;
pub use history::{GameOutcome, History, HistoryEntry};
pub use schedule::Scheduler;
pub use session::Session;

// Crate-level exports - Game types
pub use games::RoundId;
pub use games::higher_lower::{Guess, HigherLowerController};
pub use games::tictactoe::{Board, Mark, Position, Square, TicTacToeController};

// Crate-level exports - Terminal UI
pub use tui::{
    AppContext, AppController, LOG_FILE, Screen, ScreenTransition, Segment, parse_markup,
    run_tui,
};
