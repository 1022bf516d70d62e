//! User session model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated user session.
///
/// Sessions are created by [`SessionManager`](crate::session::SessionManager)
/// on login or signup and persisted as JSON under a fixed storage key, so a
/// session survives process restarts until an explicit logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID v4).
    pub id: String,
    /// Email address the user authenticated with.
    pub email: String,
    /// Display name shown in greetings.
    pub name: String,
}

impl Session {
    /// Creates a new session with a freshly generated ID.
    ///
    /// # Arguments
    ///
    /// * `email` - The authenticated email address
    /// * `name` - The display name for the user
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let a = Session::new("alice@example.com", "alice");
        let b = Session::new("alice@example.com", "alice");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serialization_round_trip() {
        let session = Session::new("bob@example.com", "bob");
        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn test_json_field_names() {
        let session = Session {
            id: "abc".to_string(),
            email: "carol@example.com".to_string(),
            name: "carol".to_string(),
        };
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["email"], "carol@example.com");
        assert_eq!(value["name"], "carol");
    }
}
