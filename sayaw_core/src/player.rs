use thiserror::Error;
use tracing::info;

pub const MAX_NAME_LENGTH: usize = 12;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("please enter a valid name")]
    Empty,
}

/// Name buffer driven by a virtual keyboard.
#[derive(Debug, Clone, Default)]
pub struct NameEntry {
    current: String,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.current
    }

    fn len(&self) -> usize {
        self.current.chars().count()
    }

    /// Appends a letter. Returns false when the key was ignored.
    pub fn push_letter(&mut self, letter: char) -> bool {
        if !letter.is_alphabetic() || self.len() >= MAX_NAME_LENGTH {
            return false;
        }
        self.current.push(letter);
        true
    }

    /// Appends a space unless the buffer is full or already ends with one.
    pub fn push_space(&mut self) -> bool {
        if self.len() >= MAX_NAME_LENGTH || self.current.ends_with(' ') {
            return false;
        }
        self.current.push(' ');
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.current.pop().is_some()
    }

    pub fn confirm(&self) -> Result<String, NameError> {
        let trimmed = self.current.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        info!(name = trimmed, "player name confirmed");
        Ok(trimmed.to_string())
    }
}
