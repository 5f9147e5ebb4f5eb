//! Player name input

use crate::consts::MAX_NAME_LEN;
use crate::platform::Key;

/// Name used when the player submits nothing
pub const DEFAULT_NAME: &str = "Player";

/// Result of feeding a key to the name field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameInput {
    Editing,
    Submitted(String),
    Cancelled,
}

/// Editable name field, capped at `MAX_NAME_LEN` characters
#[derive(Debug, Clone, Default)]
pub struct NameEntry {
    text: String,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append a character; ignored when full or not printable
    pub fn push(&mut self, ch: char) {
        if ch.is_control() || self.text.chars().count() >= MAX_NAME_LEN {
            return;
        }
        self.text.push(ch);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Final name: trimmed, or the default when blank
    pub fn submit(&self) -> String {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            trimmed.to_string()
        }
    }

    pub fn handle_key(&mut self, key: Key) -> NameInput {
        match key {
            Key::Enter => return NameInput::Submitted(self.submit()),
            Key::Escape => return NameInput::Cancelled,
            Key::Backspace => self.backspace(),
            Key::Space => self.push(' '),
            Key::Char(c) => self.push(c),
            Key::Up => {}
        }
        NameInput::Editing
    }
}
