//! MindMend interaction: external collaborators.
//!
//! Currently hosts the generative-chat backend trait and its Gemini REST
//! implementation.

pub mod chat;
pub mod gemini_client;

pub use chat::{ChatBackend, ChatMessage, ChatRole};
pub use gemini_client::GeminiClient;
