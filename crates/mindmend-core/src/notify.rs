//! Notification sink for user-facing feedback.
//!
//! Operations in the core emit short success/failure notifications (the
//! original product surfaced these as toasts). The sink is fire-and-forget
//! and not part of any operation's correctness, only its observability.

use serde::{Deserialize, Serialize};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Normal feedback for a completed operation.
    Info,
    /// A failure the user should act on.
    Destructive,
}

/// A short user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl Notification {
    /// Creates an informational notification.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Creates a destructive (failure) notification.
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Destructive,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A fire-and-forget sink for notifications.
///
/// Implementations must not fail: a notification that cannot be delivered is
/// dropped, never propagated back into the emitting operation.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that forwards notifications to the `tracing` subscriber.
///
/// Useful as a default sink for headless embedders.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => tracing::info!(
                title = %notification.title,
                "{}",
                notification.description
            ),
            Severity::Destructive => tracing::warn!(
                title = %notification.title,
                "{}",
                notification.description
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_notification() {
        let n = Notification::info("Login successful", "Welcome back, alice!");
        assert_eq!(n.severity, Severity::Info);
        assert_eq!(n.title, "Login successful");
    }

    #[test]
    fn test_destructive_notification() {
        let n = Notification::destructive("Login failed", "Invalid email format");
        assert_eq!(n.severity, Severity::Destructive);
    }
}
