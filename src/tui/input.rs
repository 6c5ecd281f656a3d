//! Keyboard helpers: board cursor and single-line text fields.

use crate::games::tictactoe::Position;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Moves the board cursor with the arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);
    let (row, col) = match key {
        KeyCode::Up if row > 0 => (row - 1, col),
        KeyCode::Down if row < 2 => (row + 1, col),
        KeyCode::Left if col > 0 => (row, col - 1),
        KeyCode::Right if col < 2 => (row, col + 1),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

/// Maps `1`..=`9` to a square, row by row from the top left.
pub fn digit_position(key: KeyCode) -> Option<Position> {
    match key {
        KeyCode::Char(c) => c
            .to_digit(10)
            .filter(|d| (1..=9).contains(d))
            .and_then(|d| Position::from_index(d as usize - 1)),
        _ => None,
    }
}

/// Editable single-line input.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    label: &'static str,
    value: String,
    masked: bool,
}

impl TextField {
    /// Creates an empty field.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    /// Creates an empty field whose contents are hidden.
    pub fn masked(label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::new(label)
        }
    }

    /// Field caption.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Current contents.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Toggles hiding of a masked field; no effect on plain fields.
    pub fn set_masked(&mut self, masked: bool) {
        self.masked = masked;
    }

    /// What to draw: the contents, or bullets when masked.
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Applies an editing key. Returns false when the key is not an edit.
    pub fn handle(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            _ => false,
        }
    }

    /// Empties the field.
    pub fn clear(&mut self) {
        self.value.clear();
    }
}
