//! MindMend core: domain logic for the mental-wellness companion.
//!
//! This crate is headless and embedder-agnostic. It owns the session
//! lifecycle, the breathing cycle engine, the journal model, and the built-in
//! meditation catalog, and defines the ports (persistence, notifications,
//! time, secrets) that embedders implement.

pub mod breathing;
pub mod clock;
pub mod config;
pub mod error;
pub mod journal;
pub mod meditation;
pub mod notify;
pub mod secret;
pub mod session;

pub use breathing::{BreathPhase, BreathingEngine, BreathingPattern};
pub use clock::{Clock, TokioClock};
pub use config::{GeminiConfig, SecretConfig};
pub use error::{MindmendError, Result};
pub use journal::{JournalEntry, JournalRepository};
pub use meditation::{MeditationLevel, MeditationSession, MEDITATION_LIBRARY};
pub use notify::{Notification, Notifier, Severity, TracingNotifier};
pub use secret::SecretService;
pub use session::{KeyValueStore, Session, SessionManager, SESSION_KEY};
