//! Marks alternate, the user first.

use super::Invariant;
use crate::games::tictactoe::{Phase, Square, TicTacToeController};

/// The user has placed as many marks as the CPU, or one more.
///
/// While waiting on either side the counts must say whose turn it is.
pub struct AlternatingTurnInvariant;

impl<R> Invariant<TicTacToeController<R>> for AlternatingTurnInvariant {
    fn holds(game: &TicTacToeController<R>) -> bool {
        let count = |mark| {
            game.board()
                .squares()
                .iter()
                .filter(|s| **s == Square::Occupied(mark))
                .count()
        };
        let user = count(game.user());
        let cpu = count(game.user().other());

        match game.phase() {
            Phase::AwaitingUser => user == cpu,
            Phase::AwaitingOpponent => user == cpu + 1,
            Phase::Terminal(_) => user == cpu || user == cpu + 1,
        }
    }

    fn description() -> &'static str {
        "Marks alternate starting with the user"
    }
}
