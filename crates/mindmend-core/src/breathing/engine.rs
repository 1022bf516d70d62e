//! Timer-driven breathing cycle engine.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::breathing::pattern::BreathingPattern;
use crate::breathing::phase::BreathPhase;
use crate::clock::Clock;
use crate::error::{MindmendError, Result};

/// Drives the breathing cycle state machine.
///
/// While running, a background task advances the phase `Inhale -> Hold ->
/// Exhale` on the configured pattern's timers, looping until [`stop`] is
/// called. The hold phase is skipped when the pattern's hold duration is
/// zero. The current phase is published through a watch channel so embedders
/// can render transitions as they happen.
///
/// Every transition is guarded by a run generation: [`stop`] invalidates the
/// generation before aborting the task, so a timer that was already due can
/// never move the phase after stop has returned.
///
/// [`stop`]: Self::stop
pub struct BreathingEngine {
    inner: Arc<Mutex<EngineInner>>,
    phase_tx: Arc<watch::Sender<BreathPhase>>,
    clock: Arc<dyn Clock>,
}

struct EngineInner {
    pattern: BreathingPattern,
    /// Incremented on every start and stop. A cycle task only transitions
    /// while its own generation is current.
    generation: u64,
    running: bool,
    /// When the current phase was entered, for elapsed/remaining queries.
    phase_entered: Instant,
    task: Option<JoinHandle<()>>,
}

impl BreathingEngine {
    /// Creates an engine with the default 4-7-8 pattern, starting idle.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let (phase_tx, _) = watch::channel(BreathPhase::Idle);
        Self {
            inner: Arc::new(Mutex::new(EngineInner {
                pattern: BreathingPattern::default(),
                generation: 0,
                running: false,
                phase_entered: clock.now(),
                task: None,
            })),
            phase_tx: Arc::new(phase_tx),
            clock,
        }
    }

    /// Creates an engine with a custom pattern.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the pattern is invalid.
    pub fn with_pattern(clock: Arc<dyn Clock>, pattern: BreathingPattern) -> Result<Self> {
        pattern.validate()?;
        let engine = Self::new(clock);
        engine.inner.lock().unwrap().pattern = pattern;
        Ok(engine)
    }

    /// Starts the breathing cycle.
    ///
    /// The phase moves to `Inhale` as soon as the cycle task is scheduled.
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an invalid-state error if the cycle is already running. The
    /// running cycle is unaffected.
    pub fn start(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.running {
            return Err(MindmendError::invalid_state(
                "start",
                self.phase_tx.borrow().to_string(),
            ));
        }

        inner.generation += 1;
        inner.running = true;

        let generation = inner.generation;
        let pattern = inner.pattern;
        let guard = Arc::clone(&self.inner);
        let phase_tx = Arc::clone(&self.phase_tx);
        let clock = Arc::clone(&self.clock);

        tracing::debug!(
            inhale = pattern.inhale_secs,
            hold = pattern.hold_secs,
            exhale = pattern.exhale_secs,
            "breathing cycle started"
        );
        inner.task = Some(tokio::spawn(async move {
            run_cycle(guard, phase_tx, clock, pattern, generation).await;
        }));
        inner.phase_entered = self.clock.now();
        Ok(())
    }

    /// Stops the breathing cycle and returns the phase to `Idle`.
    ///
    /// Safe to call when already idle. After this returns, no transition
    /// from the stopped cycle can be observed.
    pub fn stop(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.generation += 1;
        inner.running = false;
        inner.phase_entered = self.clock.now();
        if let Some(task) = inner.task.take() {
            task.abort();
        }
        self.phase_tx.send_replace(BreathPhase::Idle);
        tracing::debug!("breathing cycle stopped");
    }

    /// Replaces the pattern used by the next cycle.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the pattern is invalid, or an
    /// invalid-state error if a cycle is currently running.
    pub fn set_pattern(&self, pattern: BreathingPattern) -> Result<()> {
        pattern.validate()?;
        let mut inner = self.inner.lock().unwrap();
        if inner.running {
            return Err(MindmendError::invalid_state(
                "change pattern",
                self.phase_tx.borrow().to_string(),
            ));
        }
        inner.pattern = pattern;
        Ok(())
    }

    /// Returns the currently configured pattern.
    pub fn pattern(&self) -> BreathingPattern {
        self.inner.lock().unwrap().pattern
    }

    /// Returns the current phase.
    pub fn current_phase(&self) -> BreathPhase {
        *self.phase_tx.borrow()
    }

    /// Returns how long the current phase has been active.
    pub fn phase_elapsed(&self) -> Duration {
        let inner = self.inner.lock().unwrap();
        self.clock.now().duration_since(inner.phase_entered)
    }

    /// Returns the time left in the current phase, or `None` when idle.
    pub fn phase_remaining(&self) -> Option<Duration> {
        let inner = self.inner.lock().unwrap();
        let total = match *self.phase_tx.borrow() {
            BreathPhase::Idle => return None,
            BreathPhase::Inhale => inner.pattern.inhale(),
            BreathPhase::Hold => inner.pattern.hold(),
            BreathPhase::Exhale => inner.pattern.exhale(),
        };
        let elapsed = self.clock.now().duration_since(inner.phase_entered);
        Some(total.saturating_sub(elapsed))
    }

    /// Returns `true` if a cycle is running.
    pub fn is_running(&self) -> bool {
        self.inner.lock().unwrap().running
    }

    /// Subscribes to phase transitions.
    ///
    /// The receiver immediately observes the current phase and is notified
    /// on every transition thereafter.
    pub fn subscribe(&self) -> watch::Receiver<BreathPhase> {
        self.phase_tx.subscribe()
    }
}

impl Drop for BreathingEngine {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        inner.generation += 1;
        inner.running = false;
        if let Some(task) = inner.task.take() {
            task.abort();
        }
    }
}

async fn run_cycle(
    guard: Arc<Mutex<EngineInner>>,
    phase_tx: Arc<watch::Sender<BreathPhase>>,
    clock: Arc<dyn Clock>,
    pattern: BreathingPattern,
    generation: u64,
) {
    loop {
        if !transition(&guard, &phase_tx, clock.as_ref(), generation, BreathPhase::Inhale) {
            return;
        }
        clock.sleep(pattern.inhale()).await;

        if pattern.hold_secs > 0 {
            if !transition(&guard, &phase_tx, clock.as_ref(), generation, BreathPhase::Hold) {
                return;
            }
            clock.sleep(pattern.hold()).await;
        }

        if !transition(&guard, &phase_tx, clock.as_ref(), generation, BreathPhase::Exhale) {
            return;
        }
        clock.sleep(pattern.exhale()).await;
    }
}

/// Publishes `phase` if `generation` is still the current run.
///
/// The generation check and the send happen under the same lock that
/// `stop` takes, so a stale cycle task observes the bumped generation
/// instead of overwriting `Idle`.
fn transition(
    guard: &Mutex<EngineInner>,
    phase_tx: &watch::Sender<BreathPhase>,
    clock: &dyn Clock,
    generation: u64,
    phase: BreathPhase,
) -> bool {
    let mut inner = guard.lock().unwrap();
    if inner.generation != generation || !inner.running {
        return false;
    }
    inner.phase_entered = clock.now();
    phase_tx.send_replace(phase);
    true
}
