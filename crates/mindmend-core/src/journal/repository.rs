//! Persistence port for journal entries.

use crate::error::Result;
use crate::journal::model::JournalEntry;

/// Storage backend for journal entries.
///
/// Implementations persist entries durably; ordering is the caller's
/// concern and `list` may return entries in any order.
#[async_trait::async_trait]
pub trait JournalRepository: Send + Sync {
    /// Saves an entry, replacing any existing entry with the same ID.
    async fn save(&self, entry: &JournalEntry) -> Result<()>;

    /// Returns all stored entries.
    async fn list(&self) -> Result<Vec<JournalEntry>>;

    /// Returns the entry with the given ID.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no entry has that ID.
    async fn get(&self, id: &str) -> Result<JournalEntry>;

    /// Deletes the entry with the given ID.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no entry has that ID.
    async fn delete(&self, id: &str) -> Result<()>;
}
