//! Round controller for tic-tac-toe against the CPU.
//!
//! The controller is an explicit state machine: callers feed it [`Event`]s
//! through [`TicTacToeController::apply`] and act on the returned
//! [`Effect`]. It never sleeps; when the CPU should reply it returns
//! [`Effect::ScheduleOpponent`] and expects an [`Event::OpponentDue`]
//! carrying the same [`RoundId`] once the delay has elapsed.

use super::invariants::{ControllerInvariants, InvariantSet};
use super::opponent::select_move;
use super::rules::{Outcome, evaluate};
use super::{Board, Mark, Position, Square};
use crate::events::Observers;
use crate::games::RoundId;
use crate::history::{GameOutcome, History};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Default pause before the CPU replies.
pub const OPPONENT_DELAY: Duration = Duration::from_millis(500);

/// Whose input the controller is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The user may select a square.
    AwaitingUser,
    /// The CPU reply is pending.
    AwaitingOpponent,
    /// The round is over; only a reset is accepted.
    Terminal(GameOutcome),
}

/// Input to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The user clicked a square.
    CellSelected(Position),
    /// The CPU reply delay for `RoundId` elapsed.
    OpponentDue(RoundId),
    /// Start a fresh board.
    Reset,
}

/// What the caller has to do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The event was not applicable in the current state.
    Ignored,
    /// Deliver [`Event::OpponentDue`] for `round` after `after`.
    ScheduleOpponent {
        /// Round the reply belongs to.
        round: RoundId,
        /// Delay before the reply.
        after: Duration,
    },
    /// The CPU played and the round continues.
    OpponentMoved(Position),
    /// The round ended.
    Finished(GameOutcome),
    /// A fresh board was set up under a new round id.
    Reset {
        /// The new round.
        round: RoundId,
    },
}

/// Notification sent to subscribers after accepted transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A mark was placed.
    MoveMade {
        /// Mark placed.
        mark: Mark,
        /// Where it was placed.
        position: Position,
    },
    /// The round ended.
    Finished(GameOutcome),
    /// The board was cleared.
    Reset(RoundId),
}

/// Status line shown once a round is over.
pub fn status_message(outcome: GameOutcome) -> &'static str {
    match outcome {
        GameOutcome::Win => "You win!",
        GameOutcome::Loss => "You lose!",
        GameOutcome::Draw => "Draw!",
    }
}

/// Tic-tac-toe round controller: user (`X`) against the CPU (`O`).
#[derive(Debug)]
pub struct TicTacToeController<R = StdRng> {
    pub(crate) board: Board,
    pub(crate) phase: Phase,
    round: RoundId,
    status: Option<&'static str>,
    history: History,
    user: Mark,
    opponent_delay: Duration,
    rng: R,
    observers: Observers<GameEvent>,
}

impl TicTacToeController<StdRng> {
    /// Creates a controller with an entropy-seeded RNG.
    #[instrument]
    pub fn new(opponent_delay: Duration) -> Self {
        Self::with_rng(opponent_delay, StdRng::from_entropy())
    }

    /// Creates a controller whose CPU choices are reproducible.
    #[instrument]
    pub fn seeded(opponent_delay: Duration, seed: u64) -> Self {
        Self::with_rng(opponent_delay, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TicTacToeController<R> {
    /// Creates a controller with the given RNG for the CPU's random picks.
    pub fn with_rng(opponent_delay: Duration, rng: R) -> Self {
        info!(?opponent_delay, "Mounting tic-tac-toe");
        Self {
            board: Board::new(),
            phase: Phase::AwaitingUser,
            round: RoundId::default(),
            status: None,
            history: History::new(),
            user: Mark::X,
            opponent_delay,
            rng,
            observers: Observers::new(),
        }
    }

    /// Applies one event and reports what the caller must do next.
    #[instrument(skip(self), fields(round = %self.round, phase = ?self.phase))]
    pub fn apply(&mut self, event: Event) -> Effect {
        let effect = match event {
            Event::CellSelected(pos) => self.user_move(pos),
            Event::OpponentDue(round) => self.opponent_move(round),
            Event::Reset => self.reset(),
        };
        debug!(?effect, "Applied event");
        debug_assert_eq!(
            <ControllerInvariants as InvariantSet<Self>>::check_all(self),
            Ok(()),
            "controller invariants violated"
        );
        effect
    }

    fn user_move(&mut self, pos: Position) -> Effect {
        if self.phase != Phase::AwaitingUser {
            debug!(position = %pos, "Not the user's turn");
            return Effect::Ignored;
        }
        if !self.board.is_empty(pos) {
            debug!(position = %pos, "Square already occupied");
            return Effect::Ignored;
        }

        self.place(pos, self.user);
        if let Some(outcome) = self.finish_if_terminal() {
            return Effect::Finished(outcome);
        }

        self.phase = Phase::AwaitingOpponent;
        Effect::ScheduleOpponent {
            round: self.round,
            after: self.opponent_delay,
        }
    }

    fn opponent_move(&mut self, round: RoundId) -> Effect {
        if round != self.round {
            debug!(stale = %round, "Dropping reply from an earlier round");
            return Effect::Ignored;
        }
        if self.phase != Phase::AwaitingOpponent {
            return Effect::Ignored;
        }

        let cpu = self.user.other();
        let Some(pos) = select_move(&self.board, cpu, &mut self.rng) else {
            return Effect::Ignored;
        };

        self.place(pos, cpu);
        if let Some(outcome) = self.finish_if_terminal() {
            return Effect::Finished(outcome);
        }

        self.phase = Phase::AwaitingUser;
        Effect::OpponentMoved(pos)
    }

    fn reset(&mut self) -> Effect {
        self.round = self.round.next();
        self.board = Board::new();
        self.phase = Phase::AwaitingUser;
        self.status = None;
        info!(round = %self.round, history = self.history.len(), "Board reset");
        self.observers.notify(GameEvent::Reset(self.round));
        Effect::Reset { round: self.round }
    }

    fn place(&mut self, position: Position, mark: Mark) {
        self.board.set(position, Square::Occupied(mark));
        self.observers.notify(GameEvent::MoveMade { mark, position });
    }

    fn finish_if_terminal(&mut self) -> Option<GameOutcome> {
        let outcome = evaluate(&self.board, self.user).terminal()?;
        info!(outcome = outcome.as_str(), "Round finished");
        self.phase = Phase::Terminal(outcome);
        self.status = Some(status_message(outcome));
        self.history.record(outcome);
        self.observers.notify(GameEvent::Finished(outcome));
        Some(outcome)
    }
}

impl<R> TicTacToeController<R> {
    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Outcome derived from the current board.
    pub fn outcome(&self) -> Outcome {
        evaluate(&self.board, self.user)
    }

    /// Mark expected to move next, `None` once the round is over.
    pub fn to_move(&self) -> Option<Mark> {
        match self.phase {
            Phase::AwaitingUser => Some(self.user),
            Phase::AwaitingOpponent => Some(self.user.other()),
            Phase::Terminal(_) => None,
        }
    }

    /// The user's mark.
    pub fn user(&self) -> Mark {
        self.user
    }

    /// Identity of the current round.
    pub fn round(&self) -> RoundId {
        self.round
    }

    /// End-of-round status line, cleared on reset.
    pub fn status(&self) -> Option<&'static str> {
        self.status
    }

    /// Completed rounds for this mounted game.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Subscribes to [`GameEvent`] notifications.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        self.observers.subscribe()
    }
}
