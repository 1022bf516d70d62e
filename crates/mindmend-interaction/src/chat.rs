//! Chat message types and the backend trait.

use serde::{Deserialize, Serialize};

use mindmend_core::Result;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Wire name of the role, passed through to the API verbatim.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A conversational backend that turns a message window into a reply.
///
/// Callers pass the recent transcript (oldest first); the backend returns
/// the assistant's next message. Failures surface as external-service
/// errors and are never retried automatically.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_message(&self, messages: &[ChatMessage]) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(ChatRole::User.as_str(), "user");
        assert_eq!(ChatRole::Assistant.as_str(), "assistant");
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_message_constructors() {
        let msg = ChatMessage::user("hi");
        assert_eq!(msg.role, ChatRole::User);
        assert_eq!(msg.content, "hi");
        assert_eq!(ChatMessage::assistant("hello").role, ChatRole::Assistant);
    }
}
