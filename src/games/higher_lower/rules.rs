//! Scoring rules for higher/lower.

use crate::history::GameOutcome;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Smallest number that can be drawn.
pub const MIN_NUMBER: u8 = 1;

/// Largest number that can be drawn.
pub const MAX_NUMBER: u8 = 21;

/// Guesses per session.
pub const ROUNDS: u32 = 5;

const RANGE: RangeInclusive<u8> = MIN_NUMBER..=MAX_NUMBER;

/// The user's call on the next number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Guess {
    /// Next number is strictly greater.
    Higher,
    /// Next number is strictly smaller.
    Lower,
}

/// Draws a number uniformly from `MIN_NUMBER..=MAX_NUMBER`.
pub fn draw_number<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(RANGE)
}

/// Whether `guess` is right for the pair. A tie is never right.
pub fn is_correct(guess: Guess, current: u8, next: u8) -> bool {
    match guess {
        Guess::Higher => next > current,
        Guess::Lower => next < current,
    }
}

/// Session result for a final score out of [`ROUNDS`].
///
/// Three or more is a win, exactly two a draw, anything less a loss.
pub fn session_outcome(score: u32) -> GameOutcome {
    match score {
        s if s >= 3 => GameOutcome::Win,
        2 => GameOutcome::Draw,
        _ => GameOutcome::Loss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_higher_is_correct_when_next_is_bigger() {
        assert!(is_correct(Guess::Higher, 10, 15));
        assert!(!is_correct(Guess::Lower, 10, 15));
    }

    #[test]
    fn test_tie_is_never_correct() {
        assert!(!is_correct(Guess::Higher, 10, 10));
        assert!(!is_correct(Guess::Lower, 10, 10));
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(session_outcome(5), GameOutcome::Win);
        assert_eq!(session_outcome(3), GameOutcome::Win);
        assert_eq!(session_outcome(2), GameOutcome::Draw);
        assert_eq!(session_outcome(1), GameOutcome::Loss);
        assert_eq!(session_outcome(0), GameOutcome::Loss);
    }

    #[test]
    fn test_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..2000 {
            let n = draw_number(&mut rng);
            assert!((MIN_NUMBER..=MAX_NUMBER).contains(&n));
            seen_min |= n == MIN_NUMBER;
            seen_max |= n == MAX_NUMBER;
        }
        assert!(seen_min && seen_max);
    }
}
