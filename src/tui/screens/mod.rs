//! Screen implementations for the app state machine.

mod higher_lower;
mod home;
mod login;
mod register;
mod text_processor;
mod tictactoe;

pub use higher_lower::HigherLowerScreen;
pub use home::HomeScreen;
pub use login::LoginScreen;
pub use register::RegisterScreen;
pub use text_processor::TextProcessorScreen;
pub use tictactoe::TicTacToeScreen;

use std::time::Duration;

/// Pause between a success message and the follow-up navigation.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);
