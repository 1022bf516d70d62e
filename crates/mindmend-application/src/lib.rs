//! Application layer for MindMend.
//!
//! This crate provides use case implementations that coordinate between
//! the domain core, external collaborators, and infrastructure.

pub mod chat_service;
pub mod journal_service;

pub use chat_service::{ChatService, WELCOME_MESSAGE};
pub use journal_service::JournalService;
