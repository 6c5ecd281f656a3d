//! The phase agrees with the board.

use super::Invariant;
use crate::games::tictactoe::rules::evaluate;
use crate::games::tictactoe::{Phase, TicTacToeController};

/// `Terminal(outcome)` exactly when the board evaluates to `outcome`.
pub struct TerminalPhaseInvariant;

impl<R> Invariant<TicTacToeController<R>> for TerminalPhaseInvariant {
    fn holds(game: &TicTacToeController<R>) -> bool {
        let on_board = evaluate(game.board(), game.user()).terminal();
        match game.phase() {
            Phase::Terminal(outcome) => on_board == Some(outcome),
            Phase::AwaitingUser | Phase::AwaitingOpponent => on_board.is_none(),
        }
    }

    fn description() -> &'static str {
        "Terminal phase matches the board"
    }
}
