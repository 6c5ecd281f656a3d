//! CPU opponent: greedy one-ply move selection.
//!
//! Priority order, first match wins:
//!
//! 1. complete a line for the CPU,
//! 2. block a line the user would complete,
//! 3. take the center,
//! 4. take a random empty corner,
//! 5. take a random empty square.
//!
//! Steps 1 and 2 scan empty squares in index order. This is not minimax,
//! but it never misses an immediate win or an immediate block.

use super::rules::check_winner;
use super::{Board, Mark, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Which rule produced a CPU move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Completes a line for the CPU.
    Win,
    /// Stops the user from completing a line.
    Block,
    /// Center square was free.
    Center,
    /// Random empty corner.
    Corner,
    /// Random empty square.
    Fallback,
}

/// Picks the CPU's move on `board`, playing `cpu`.
///
/// Returns `None` when the board has no empty square.
#[instrument(skip(board, rng), fields(cpu = %cpu))]
pub fn select_move<R: Rng + ?Sized>(board: &Board, cpu: Mark, rng: &mut R) -> Option<Position> {
    select_move_with_reason(board, cpu, rng).map(|(pos, _)| pos)
}

/// Like [`select_move`], also reporting which rule fired.
pub fn select_move_with_reason<R: Rng + ?Sized>(
    board: &Board,
    cpu: Mark,
    rng: &mut R,
) -> Option<(Position, Reason)> {
    let available = Position::valid_moves(board);
    if available.is_empty() {
        debug!("No moves available");
        return None;
    }

    if let Some(pos) = completing_move(board, &available, cpu) {
        debug!(position = %pos, "Taking the win");
        return Some((pos, Reason::Win));
    }

    if let Some(pos) = completing_move(board, &available, cpu.other()) {
        debug!(position = %pos, "Blocking");
        return Some((pos, Reason::Block));
    }

    if available.contains(&Position::Center) {
        return Some((Position::Center, Reason::Center));
    }

    let corners: Vec<Position> = available.iter().copied().filter(|p| p.is_corner()).collect();
    if let Some(pos) = corners.choose(rng) {
        return Some((*pos, Reason::Corner));
    }

    available.choose(rng).map(|pos| (*pos, Reason::Fallback))
}

/// First empty square where `mark` would complete a line.
fn completing_move(board: &Board, available: &[Position], mark: Mark) -> Option<Position> {
    available
        .iter()
        .copied()
        .find(|&pos| check_winner(&board.with(pos, mark)) == Some(mark))
}
