//! Session lifecycle management.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::clock::Clock;
use crate::error::{MindmendError, Result};
use crate::notify::{Notification, Notifier};
use crate::session::model::Session;
use crate::session::store::KeyValueStore;

/// Storage key under which the current session is persisted.
pub const SESSION_KEY: &str = "mindmend-user";

/// Simulated latency applied to login and signup.
const AUTH_LATENCY: Duration = Duration::from_millis(1000);

/// Manages the authenticated user session and its lifecycle.
///
/// `SessionManager` is responsible for:
/// - Validating credentials on login and signup
/// - Creating sessions and persisting them through the [`KeyValueStore`]
/// - Restoring a persisted session on startup
/// - Clearing persisted state on logout
/// - Emitting success/failure notifications through the [`Notifier`]
///
/// Authentication is simulated: any well-formed credentials are accepted
/// after a fixed latency. The latency is routed through the injected
/// [`Clock`], so tests under a paused runtime complete instantly.
pub struct SessionManager {
    /// Currently active session, mirrored in the store.
    current: RwLock<Option<Session>>,
    /// Persistence backend for the session payload.
    store: Arc<dyn KeyValueStore>,
    /// Sink for user-facing notifications.
    notifier: Arc<dyn Notifier>,
    /// Time source for the simulated auth latency.
    clock: Arc<dyn Clock>,
    latency: Duration,
}

impl SessionManager {
    /// Creates a new `SessionManager` with the default auth latency.
    ///
    /// # Arguments
    ///
    /// * `store` - Persistence backend for session state
    /// * `notifier` - Sink for success/failure notifications
    /// * `clock` - Time source for the simulated latency
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_latency(store, notifier, clock, AUTH_LATENCY)
    }

    /// Creates a new `SessionManager` with a custom auth latency.
    pub fn with_latency(
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        latency: Duration,
    ) -> Self {
        Self {
            current: RwLock::new(None),
            store,
            notifier,
            clock,
            latency,
        }
    }

    /// Attempts to restore a persisted session on startup.
    ///
    /// A payload that fails to parse is treated as absent: the stale entry is
    /// deleted and `None` is returned, so a corrupt store never blocks the
    /// login flow.
    ///
    /// # Returns
    ///
    /// `Some(session)` if a valid session was restored, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn restore(&self) -> Result<Option<Session>> {
        let Some(json) = self.store.get(SESSION_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Session>(&json) {
            Ok(session) => {
                tracing::debug!(email = %session.email, "restored persisted session");
                let mut current = self.current.write().await;
                *current = Some(session.clone());
                Ok(Some(session))
            }
            Err(err) => {
                tracing::warn!(error = %err, "discarding malformed session payload");
                self.store.delete(SESSION_KEY).await?;
                Ok(None)
            }
        }
    }

    /// Logs in with the given credentials.
    ///
    /// Authentication is simulated: any password is accepted. The display
    /// name is derived from the local part of the email address. On success
    /// the session is persisted and an informational notification is
    /// emitted; on failure a destructive notification carries the error
    /// message.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the email lacks an `@`. No state
    /// changes on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let result = self.do_login(email, password).await;
        match &result {
            Ok(session) => self.notifier.notify(Notification::info(
                "Login successful",
                format!("Welcome back, {}!", session.name),
            )),
            Err(err) => self
                .notifier
                .notify(Notification::destructive("Login failed", err.to_string())),
        }
        result
    }

    async fn do_login(&self, email: &str, _password: &str) -> Result<Session> {
        validate_email(email)?;

        self.clock.sleep(self.latency).await;

        let name = local_part(email).to_string();
        let session = Session::new(email, name);
        self.activate(session.clone()).await?;

        tracing::info!(email = %session.email, "user logged in");
        Ok(session)
    }

    /// Creates an account and logs the new user in.
    ///
    /// Unlike [`login`](Self::login), the display name is supplied by the
    /// caller and must not be empty.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is blank, the email lacks an
    /// `@`, or the password is shorter than 6 characters. No state changes
    /// on failure.
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> Result<Session> {
        let result = self.do_signup(email, password, name).await;
        match &result {
            Ok(session) => self.notifier.notify(Notification::info(
                "Account created",
                format!("Welcome to MindMend, {}!", session.name),
            )),
            Err(err) => self
                .notifier
                .notify(Notification::destructive("Signup failed", err.to_string())),
        }
        result
    }

    async fn do_signup(&self, email: &str, password: &str, name: &str) -> Result<Session> {
        if name.trim().is_empty() {
            return Err(MindmendError::validation("Name is required"));
        }
        validate_email(email)?;
        validate_password(password)?;

        self.clock.sleep(self.latency).await;

        let session = Session::new(email, name);
        self.activate(session.clone()).await?;

        tracing::info!(email = %session.email, "account created");
        Ok(session)
    }

    /// Logs out the current user.
    ///
    /// Clears the in-memory session, removes the persisted payload, and
    /// emits a notification. Always succeeds and is idempotent: logging out
    /// without an active session is a no-op apart from the notification,
    /// and a store failure is logged rather than propagated.
    pub async fn logout(&self) {
        {
            let mut current = self.current.write().await;
            *current = None;
        }
        if let Err(err) = self.store.delete(SESSION_KEY).await {
            tracing::warn!(error = %err, "failed to remove persisted session");
        }

        self.notifier.notify(Notification::info(
            "Logged out",
            "You've been successfully logged out.",
        ));
        tracing::info!("user logged out");
    }

    /// Returns a copy of the currently active session, if any.
    pub async fn current_session(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// Returns `true` if a user is currently logged in.
    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Persists `session` and makes it the active session.
    async fn activate(&self, session: Session) -> Result<()> {
        let json = serde_json::to_string(&session)?;
        self.store.set(SESSION_KEY, &json).await?;

        let mut current = self.current.write().await;
        *current = Some(session);
        Ok(())
    }
}

/// The only email requirement in this simulated model is an `@`.
fn validate_email(email: &str) -> Result<()> {
    if email.contains('@') {
        Ok(())
    } else {
        Err(MindmendError::validation("Invalid email format"))
    }
}

fn validate_password(password: &str) -> Result<()> {
    if password.len() < 6 {
        return Err(MindmendError::validation(
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

/// Returns the local part of an email address.
fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
