//! MindMend infrastructure: file-backed implementations of the core ports.
//!
//! Provides persistent storage (key-value store, journal repository), path
//! resolution, and secret loading. Everything here implements a trait from
//! `mindmend-core`; the core never touches the filesystem itself.

pub mod journal_repository;
pub mod kv_store;
pub mod paths;
pub mod secret_service;

pub use journal_repository::JsonJournalRepository;
pub use kv_store::{JsonFileStore, MemoryStore};
pub use paths::MindmendPaths;
pub use secret_service::SecretFileService;
