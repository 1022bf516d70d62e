//! Clock abstraction for timer-driven logic.
//!
//! Both the session manager (simulated auth latency) and the breathing cycle
//! engine (phase timers) wait on scheduled, non-blocking delays. Routing those
//! waits through a trait keeps wall-clock time out of the domain logic: tests
//! run against tokio's paused clock and advance virtual time deterministically.

use std::time::Duration;
use tokio::time::Instant;

/// A source of time and scheduled delays.
#[async_trait::async_trait]
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Suspends the current task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by `tokio::time`.
///
/// Under a `#[tokio::test(start_paused = true)]` runtime this clock follows
/// tokio's virtual time, so tests can use it directly.
#[derive(Debug, Clone, Default)]
pub struct TokioClock;

#[async_trait::async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
