//! Board outcome relative to the user.

use super::super::{Board, Mark};
use super::{check_winner, is_full};
use crate::history::GameOutcome;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Outcome of a board from the user's point of view.
///
/// Always derived from the board, never stored next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line and empty squares remain.
    InProgress,
    /// The user completed a line.
    Win,
    /// The CPU completed a line.
    Loss,
    /// Full board without a line.
    Draw,
}

impl Outcome {
    /// Returns the terminal outcome, or `None` while the game is in progress.
    pub fn terminal(self) -> Option<GameOutcome> {
        match self {
            Outcome::InProgress => None,
            Outcome::Win => Some(GameOutcome::Win),
            Outcome::Loss => Some(GameOutcome::Loss),
            Outcome::Draw => Some(GameOutcome::Draw),
        }
    }
}

/// Evaluates the board for the player holding `user`.
#[instrument(level = "trace", skip(board))]
pub fn evaluate(board: &Board, user: Mark) -> Outcome {
    match check_winner(board) {
        Some(mark) if mark == user => Outcome::Win,
        Some(_) => Outcome::Loss,
        None if is_full(board) => Outcome::Draw,
        None => Outcome::InProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_is_relative_to_user() {
        let board: Board = "OOO XX. X..".parse().unwrap();
        assert_eq!(evaluate(&board, Mark::X), Outcome::Loss);
        assert_eq!(evaluate(&board, Mark::O), Outcome::Win);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board: Board = "XOX XOO OXX".parse().unwrap();
        assert_eq!(evaluate(&board, Mark::X), Outcome::Draw);
        assert_eq!(Outcome::Draw.terminal(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_win_on_last_square_beats_draw() {
        let board: Board = "XOX OXO OXX".parse().unwrap();
        assert_eq!(evaluate(&board, Mark::X), Outcome::Win);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let board: Board = "X.. .O. ...".parse().unwrap();
        let before = board.clone();
        assert_eq!(evaluate(&board, Mark::X), Outcome::InProgress);
        assert_eq!(evaluate(&board, Mark::X), Outcome::InProgress);
        assert_eq!(board, before);
    }
}
