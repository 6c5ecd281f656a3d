//! Higher/lower: guess whether the next number beats the current one.

mod controller;
pub mod rules;

pub use controller::{
    Effect, Event, GameEvent, HigherLowerController, Phase, REVEAL_DELAY, status_message,
};
pub use rules::{Guess, MAX_NUMBER, MIN_NUMBER, ROUNDS, draw_number, is_correct, session_outcome};
