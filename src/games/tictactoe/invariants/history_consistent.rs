//! Finished rounds are logged.

use super::Invariant;
use crate::games::tictactoe::{Phase, TicTacToeController};

/// A terminal round is the newest history entry.
pub struct HistoryConsistentInvariant;

impl<R> Invariant<TicTacToeController<R>> for HistoryConsistentInvariant {
    fn holds(game: &TicTacToeController<R>) -> bool {
        match game.phase() {
            Phase::Terminal(outcome) => game
                .history()
                .entries()
                .last()
                .is_some_and(|entry| *entry.outcome() == outcome),
            _ => true,
        }
    }

    fn description() -> &'static str {
        "Terminal outcome is recorded in history"
    }
}
