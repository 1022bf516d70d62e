//! Key-value persistence port for session state.
//!
//! The session manager persists the current session through this trait rather
//! than touching the filesystem directly. Production embedders supply a
//! file-backed implementation; tests supply an in-memory fake.

use crate::error::Result;

/// A string-keyed, string-valued persistence backend.
///
/// Keys are opaque identifiers and values are serialized payloads (the
/// session manager stores JSON). Implementations must tolerate concurrent
/// access from multiple tasks.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any existing value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`.
    ///
    /// Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
