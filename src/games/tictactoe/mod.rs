//! Tic-tac-toe against a heuristic CPU opponent.

mod controller;
pub mod invariants;
pub mod opponent;
mod position;
pub mod rules;
mod types;

pub use controller::{
    Effect, Event, GameEvent, OPPONENT_DELAY, Phase, TicTacToeController, status_message,
};
pub use opponent::{Reason, select_move, select_move_with_reason};
pub use position::Position;
pub use rules::{Outcome, check_winner, evaluate, is_full};
pub use types::{Board, BoardParseError, Mark, Square};
