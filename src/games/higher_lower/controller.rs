//! Round controller for a five-guess higher/lower session.

use super::rules::{Guess, ROUNDS, draw_number, is_correct, session_outcome};
use crate::events::Observers;
use crate::games::RoundId;
use crate::history::{GameOutcome, History};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Default pause while the next number is revealed.
pub const REVEAL_DELAY: Duration = Duration::from_millis(1000);

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for Higher or Lower.
    AwaitingGuess,
    /// The next number is shown; the round advances after the delay.
    RevealDelay {
        /// What the user guessed.
        guess: Guess,
        /// Whether the guess scored.
        correct: bool,
    },
    /// Session over; only a replay is accepted.
    RoundOver(GameOutcome),
}

/// Input to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The user guessed.
    Guess(Guess),
    /// The reveal delay scheduled under `RoundId` elapsed.
    RevealElapsed(RoundId),
    /// Start a new session.
    Replay,
}

/// What the caller has to do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The event was not applicable in the current phase.
    Ignored,
    /// Deliver [`Event::RevealElapsed`] for `round` after `after`.
    ScheduleReveal {
        /// Session the reveal belongs to.
        round: RoundId,
        /// Delay before advancing.
        after: Duration,
        /// Whether the guess scored.
        correct: bool,
    },
    /// A new pair of numbers is in play.
    NextRound {
        /// Guesses completed so far.
        played: u32,
    },
    /// The session ended.
    Finished(GameOutcome),
    /// A new session started.
    Replayed {
        /// The new session id.
        round: RoundId,
    },
}

/// Notification sent to subscribers after accepted transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A guess was judged.
    Guessed {
        /// The guess.
        guess: Guess,
        /// Whether it scored.
        correct: bool,
        /// Score after the guess.
        score: u32,
    },
    /// The next number became current.
    Advanced {
        /// New current number.
        current: u8,
    },
    /// The session ended.
    Finished {
        /// Session result.
        outcome: GameOutcome,
        /// Final score.
        score: u32,
    },
    /// A new session started.
    Replayed(RoundId),
}

/// Status line shown once a session is over.
pub fn status_message(outcome: GameOutcome) -> &'static str {
    match outcome {
        GameOutcome::Win => "You won the match!",
        GameOutcome::Draw => "The match is a draw!",
        GameOutcome::Loss => "You lost the match",
    }
}

/// Higher/lower session controller.
#[derive(Debug)]
pub struct HigherLowerController<R = StdRng> {
    pub(crate) current: u8,
    pub(crate) next: u8,
    score: u32,
    played: u32,
    phase: Phase,
    session: RoundId,
    history: History,
    reveal_delay: Duration,
    rng: R,
    observers: Observers<GameEvent>,
}

impl HigherLowerController<StdRng> {
    /// Creates a controller with an entropy-seeded RNG.
    #[instrument]
    pub fn new(reveal_delay: Duration) -> Self {
        Self::with_rng(reveal_delay, StdRng::from_entropy())
    }

    /// Creates a controller whose draws are reproducible.
    #[instrument]
    pub fn seeded(reveal_delay: Duration, seed: u64) -> Self {
        Self::with_rng(reveal_delay, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> HigherLowerController<R> {
    /// Creates a controller drawing numbers from `rng`.
    pub fn with_rng(reveal_delay: Duration, mut rng: R) -> Self {
        let current = draw_number(&mut rng);
        let next = draw_number(&mut rng);
        info!(current, ?reveal_delay, "Mounting higher/lower");
        Self {
            current,
            next,
            score: 0,
            played: 0,
            phase: Phase::AwaitingGuess,
            session: RoundId::default(),
            history: History::new(),
            reveal_delay,
            rng,
            observers: Observers::new(),
        }
    }

    /// Applies one event and reports what the caller must do next.
    #[instrument(skip(self), fields(session = %self.session, phase = ?self.phase))]
    pub fn apply(&mut self, event: Event) -> Effect {
        let effect = match event {
            Event::Guess(guess) => self.guess(guess),
            Event::RevealElapsed(session) => self.advance(session),
            Event::Replay => self.replay(),
        };
        debug!(?effect, score = self.score, played = self.played, "Applied event");
        effect
    }

    fn guess(&mut self, guess: Guess) -> Effect {
        if self.phase != Phase::AwaitingGuess {
            debug!(?guess, "Guess outside of a guessing phase");
            return Effect::Ignored;
        }

        let correct = is_correct(guess, self.current, self.next);
        if correct {
            self.score += 1;
        }
        self.phase = Phase::RevealDelay { guess, correct };
        self.observers.notify(GameEvent::Guessed {
            guess,
            correct,
            score: self.score,
        });

        Effect::ScheduleReveal {
            round: self.session,
            after: self.reveal_delay,
            correct,
        }
    }

    fn advance(&mut self, session: RoundId) -> Effect {
        if session != self.session {
            debug!(stale = %session, "Dropping reveal from an earlier session");
            return Effect::Ignored;
        }
        if !matches!(self.phase, Phase::RevealDelay { .. }) {
            return Effect::Ignored;
        }

        self.played += 1;
        if self.played >= ROUNDS {
            let outcome = session_outcome(self.score);
            info!(score = self.score, outcome = outcome.as_str(), "Session finished");
            self.phase = Phase::RoundOver(outcome);
            self.history.record(outcome);
            self.observers.notify(GameEvent::Finished {
                outcome,
                score: self.score,
            });
            return Effect::Finished(outcome);
        }

        self.current = self.next;
        self.next = draw_number(&mut self.rng);
        self.phase = Phase::AwaitingGuess;
        self.observers.notify(GameEvent::Advanced {
            current: self.current,
        });
        Effect::NextRound {
            played: self.played,
        }
    }

    fn replay(&mut self) -> Effect {
        self.session = self.session.next();
        self.current = draw_number(&mut self.rng);
        self.next = draw_number(&mut self.rng);
        self.score = 0;
        self.played = 0;
        self.phase = Phase::AwaitingGuess;
        info!(session = %self.session, history = self.history.len(), "New session");
        self.observers.notify(GameEvent::Replayed(self.session));
        Effect::Replayed {
            round: self.session,
        }
    }
}

impl<R> HigherLowerController<R> {
    /// Number the user is guessing against.
    pub fn current(&self) -> u8 {
        self.current
    }

    /// The next number, only while it is revealed.
    pub fn revealed(&self) -> Option<u8> {
        match self.phase {
            Phase::AwaitingGuess => None,
            Phase::RevealDelay { .. } | Phase::RoundOver(_) => Some(self.next),
        }
    }

    /// Correct guesses this session.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Guesses completed this session.
    pub fn played(&self) -> u32 {
        self.played
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Identity of the current session.
    pub fn session(&self) -> RoundId {
        self.session
    }

    /// End-of-session status line.
    pub fn status(&self) -> Option<&'static str> {
        match self.phase {
            Phase::RoundOver(outcome) => Some(status_message(outcome)),
            _ => None,
        }
    }

    /// Completed sessions for this mounted game.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Subscribes to [`GameEvent`] notifications.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        self.observers.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> HigherLowerController {
        HigherLowerController::seeded(REVEAL_DELAY, 5)
    }

    /// Plays one full guess with the pair fixed to `current`/`next`.
    fn play(game: &mut HigherLowerController, current: u8, next: u8, guess: Guess) -> Effect {
        game.current = current;
        game.next = next;
        game.apply(Event::Guess(guess));
        game.apply(Event::RevealElapsed(game.session()))
    }

    #[test]
    fn test_correct_higher_scores() {
        let mut game = controller();
        game.current = 10;
        game.next = 15;

        let effect = game.apply(Event::Guess(Guess::Higher));

        assert_eq!(
            effect,
            Effect::ScheduleReveal {
                round: game.session(),
                after: REVEAL_DELAY,
                correct: true
            }
        );
        assert_eq!(game.score(), 1);
        assert_eq!(game.revealed(), Some(15));
    }

    #[test]
    fn test_tie_does_not_score() {
        let mut game = controller();
        game.current = 10;
        game.next = 10;

        game.apply(Event::Guess(Guess::Higher));

        assert_eq!(game.score(), 0);
        assert_eq!(
            game.phase(),
            Phase::RevealDelay {
                guess: Guess::Higher,
                correct: false
            }
        );
    }

    #[test]
    fn test_guess_during_reveal_is_ignored() {
        let mut game = controller();
        game.current = 3;
        game.next = 9;
        game.apply(Event::Guess(Guess::Higher));

        assert_eq!(game.apply(Event::Guess(Guess::Higher)), Effect::Ignored);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_reveal_promotes_next_number() {
        let mut game = controller();
        let effect = play(&mut game, 4, 17, Guess::Higher);

        assert_eq!(effect, Effect::NextRound { played: 1 });
        assert_eq!(game.current(), 17);
        assert_eq!(game.revealed(), None);
        assert_eq!(game.phase(), Phase::AwaitingGuess);
    }

    fn finish_with_score(score: u32) -> HigherLowerController {
        let mut game = controller();
        let mut last = Effect::Ignored;
        for round in 0..ROUNDS {
            let guess = if round < score { Guess::Higher } else { Guess::Lower };
            last = play(&mut game, 5, 12, guess);
        }
        assert!(matches!(last, Effect::Finished(_)));
        game
    }

    #[test]
    fn test_three_correct_wins() {
        let game = finish_with_score(3);
        assert_eq!(game.phase(), Phase::RoundOver(GameOutcome::Win));
        assert_eq!(game.status(), Some("You won the match!"));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_two_correct_draws() {
        let game = finish_with_score(2);
        assert_eq!(game.phase(), Phase::RoundOver(GameOutcome::Draw));
    }

    #[test]
    fn test_one_correct_loses() {
        let game = finish_with_score(1);
        assert_eq!(game.phase(), Phase::RoundOver(GameOutcome::Loss));
        let game = finish_with_score(0);
        assert_eq!(game.phase(), Phase::RoundOver(GameOutcome::Loss));
    }

    #[test]
    fn test_guess_after_session_is_ignored() {
        let mut game = finish_with_score(4);
        assert_eq!(game.apply(Event::Guess(Guess::Lower)), Effect::Ignored);
        assert_eq!(game.score(), 4);
        assert_eq!(game.played(), ROUNDS);
    }

    #[test]
    fn test_replay_keeps_history() {
        let mut game = finish_with_score(3);
        let old = game.session();

        assert_eq!(
            game.apply(Event::Replay),
            Effect::Replayed { round: old.next() }
        );
        assert_eq!(game.score(), 0);
        assert_eq!(game.played(), 0);
        assert_eq!(game.phase(), Phase::AwaitingGuess);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_stale_reveal_after_replay_is_dropped() {
        let mut game = controller();
        game.current = 2;
        game.next = 8;
        game.apply(Event::Guess(Guess::Higher));
        let pending = game.session();
        game.apply(Event::Replay);

        assert_eq!(game.apply(Event::RevealElapsed(pending)), Effect::Ignored);
        assert_eq!(game.played(), 0);
        assert_eq!(game.score(), 0);
    }
}
