//! Journal entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MindmendError, Result};

/// Lowest mood rating.
pub const MOOD_MIN: u8 = 1;
/// Highest mood rating.
pub const MOOD_MAX: u8 = 5;

/// A single journal (log book) entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique entry identifier (UUID v4).
    pub id: String,
    /// When the entry was written.
    pub date: DateTime<Utc>,
    pub title: String,
    pub content: String,
    /// Mood rating from 1 (worst) to 5 (best).
    pub mood: u8,
    /// Free-form activity tags, e.g. "Meditation".
    pub activities: Vec<String>,
}

impl JournalEntry {
    /// Creates an entry dated now with a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns a validation error if title or content is blank, or if the
    /// mood is outside 1..=5.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        mood: u8,
        activities: Vec<String>,
    ) -> Result<Self> {
        let entry = Self {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            title: title.into(),
            content: content.into(),
            mood,
            activities,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Checks the entry against the journal's invariants.
    ///
    /// # Errors
    ///
    /// Returns a validation error if title or content is blank, or if the
    /// mood is outside 1..=5.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(MindmendError::validation(
                "Please provide a title and content for your entry.",
            ));
        }
        if !(MOOD_MIN..=MOOD_MAX).contains(&self.mood) {
            return Err(MindmendError::validation(format!(
                "Mood must be between {} and {}",
                MOOD_MIN, MOOD_MAX
            )));
        }
        Ok(())
    }
}
