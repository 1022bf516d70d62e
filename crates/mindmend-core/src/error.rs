//! Error types for the MindMend core.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the MindMend core crates.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize)]
pub enum MindmendError {
    /// Malformed input to an operation (bad email, short password, empty
    /// title). The operation aborts with no state change.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation was invoked in a state that forbids it, such as starting
    /// a breathing cycle that is already running. The state machine is left
    /// untouched.
    #[error("Invalid state: cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: String,
    },

    /// Failure reported by an external collaborator (the generative-chat
    /// API). Surfaced verbatim to the caller, never retried automatically.
    #[error("External service error: {message}")]
    ExternalService {
        status_code: Option<u16>,
        message: String,
    },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MindmendError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an InvalidState error
    pub fn invalid_state(operation: &'static str, state: impl Into<String>) -> Self {
        Self::InvalidState {
            operation,
            state: state.into(),
        }
    }

    /// Creates an ExternalService error without an HTTP status
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::ExternalService {
            status_code: None,
            message: message.into(),
        }
    }

    /// Creates an ExternalService error carrying an HTTP status
    pub fn external_service_with_status(status_code: u16, message: impl Into<String>) -> Self {
        Self::ExternalService {
            status_code: Some(status_code),
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an InvalidState error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }

    /// Check if this is an ExternalService error
    pub fn is_external_service(&self) -> bool {
        matches!(self, Self::ExternalService { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MindmendError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MindmendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MindmendError>`.
pub type Result<T> = std::result::Result<T, MindmendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_constructor() {
        let err = MindmendError::validation("Invalid email format");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: Invalid email format");
    }

    #[test]
    fn test_invalid_state_constructor() {
        let err = MindmendError::invalid_state("start", "Inhale");
        assert!(err.is_invalid_state());
        assert_eq!(err.to_string(), "Invalid state: cannot start while Inhale");
    }

    #[test]
    fn test_external_service_with_status() {
        let err = MindmendError::external_service_with_status(429, "rate limited");
        match err {
            MindmendError::ExternalService {
                status_code,
                ref message,
            } => {
                assert_eq!(status_code, Some(429));
                assert_eq!(message, "rate limited");
            }
            _ => panic!("expected ExternalService"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: MindmendError = io_err.into();
        assert!(matches!(err, MindmendError::Io { .. }));
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: MindmendError = parse_err.into();
        assert!(matches!(err, MindmendError::Serialization { .. }));
    }
}
