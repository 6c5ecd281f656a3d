//! Game implementations.

pub mod higher_lower;
pub mod tictactoe;

use serde::{Deserialize, Serialize};

/// Identity of the round a controller is currently playing.
///
/// Bumped on every reset or replay. Deferred events carry the id they were
/// scheduled under, so a callback that fires after a reset is recognised as
/// stale and dropped.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    derive_more::Display,
)]
#[display("round#{}", _0)]
pub struct RoundId(u64);

impl RoundId {
    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}
