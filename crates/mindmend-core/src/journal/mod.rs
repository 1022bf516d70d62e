//! Journal (log book): entry model and persistence port.

pub mod model;
pub mod repository;

pub use model::{JournalEntry, MOOD_MAX, MOOD_MIN};
pub use repository::JournalRepository;
