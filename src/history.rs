//! Append-only record of completed rounds.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Completed round outcome from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    /// User won the round.
    Win,
    /// User lost the round.
    Loss,
    /// Round ended in a draw.
    Draw,
}

impl GameOutcome {
    /// Short lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Draw => "draw",
        }
    }

    /// Single-glyph badge for the history strip.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Win => "✓",
            Self::Loss => "✗",
            Self::Draw => "=",
        }
    }
}

/// One immutable record of a completed round.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct HistoryEntry {
    outcome: GameOutcome,
    recorded_at: DateTime<Utc>,
}

/// History of completed rounds for one mounted game view.
///
/// Entries are only ever appended; resets of the game never shrink it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry stamped with the current time.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: GameOutcome) -> &HistoryEntry {
        self.record_at(outcome, Utc::now())
    }

    /// Appends an entry with an explicit timestamp.
    pub fn record_at(&mut self, outcome: GameOutcome, recorded_at: DateTime<Utc>) -> &HistoryEntry {
        debug!(outcome = outcome.as_str(), total = self.entries.len() + 1, "Recording round");
        self.entries.push(HistoryEntry {
            outcome,
            recorded_at,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The most recent `window` entries, oldest first.
    pub fn recent(&self, window: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(window);
        &self.entries[start..]
    }

    /// Number of recorded rounds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no round has completed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_window_keeps_order() {
        let mut history = History::new();
        for outcome in [
            GameOutcome::Win,
            GameOutcome::Loss,
            GameOutcome::Draw,
            GameOutcome::Win,
        ] {
            history.record(outcome);
        }

        let recent: Vec<_> = history.recent(3).iter().map(|e| *e.outcome()).collect();
        assert_eq!(
            recent,
            vec![GameOutcome::Loss, GameOutcome::Draw, GameOutcome::Win]
        );
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn test_recent_window_larger_than_history() {
        let mut history = History::new();
        history.record(GameOutcome::Draw);
        assert_eq!(history.recent(3).len(), 1);
        assert!(History::new().recent(3).is_empty());
    }

    #[test]
    fn test_timestamps_are_kept() {
        let mut history = History::new();
        let at = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let entry = history.record_at(GameOutcome::Win, at).clone();
        assert_eq!(*entry.recorded_at(), at);
    }
}
