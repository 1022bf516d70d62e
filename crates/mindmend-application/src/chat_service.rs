//! Chat use case: transcript management around the chat backend.

use std::sync::Arc;

use tokio::sync::RwLock;

use mindmend_core::{MindmendError, Notification, Notifier, Result};
use mindmend_interaction::{ChatBackend, ChatMessage};

/// Greeting shown before the first user message.
pub const WELCOME_MESSAGE: &str = "Hello! I'm your MindMend assistant. How are you feeling today?";

/// How many prior messages accompany each request.
const CONTEXT_WINDOW: usize = 10;

/// Holds the chat transcript and drives the backend.
///
/// The transcript starts with a welcome message from the assistant. Each
/// send forwards the last [`CONTEXT_WINDOW`] messages plus the new user
/// message. A failed send keeps the user message in the transcript and
/// emits a destructive notification; the backend is never retried.
pub struct ChatService {
    backend: Arc<dyn ChatBackend>,
    notifier: Arc<dyn Notifier>,
    transcript: RwLock<Vec<ChatMessage>>,
}

impl ChatService {
    /// Creates a service with the welcome message already in the transcript.
    pub fn new(backend: Arc<dyn ChatBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            transcript: RwLock::new(vec![ChatMessage::assistant(WELCOME_MESSAGE)]),
        }
    }

    /// Sends a user message and returns the assistant's reply.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank message, or the backend's
    /// external-service error verbatim.
    pub async fn send(&self, input: &str) -> Result<String> {
        if input.trim().is_empty() {
            return Err(MindmendError::validation("Message must not be empty"));
        }

        let user_message = ChatMessage::user(input);
        let window = {
            let mut transcript = self.transcript.write().await;
            let start = transcript.len().saturating_sub(CONTEXT_WINDOW);
            let mut window = transcript[start..].to_vec();
            transcript.push(user_message.clone());
            window.push(user_message);
            window
        };

        match self.backend.send_message(&window).await {
            Ok(reply) => {
                let mut transcript = self.transcript.write().await;
                transcript.push(ChatMessage::assistant(reply.clone()));
                Ok(reply)
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat backend request failed");
                self.notifier
                    .notify(Notification::destructive("Error", err.to_string()));
                Err(err)
            }
        }
    }

    /// Returns a copy of the full transcript, oldest first.
    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.read().await.clone()
    }
}
