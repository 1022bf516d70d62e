//! Breathing pattern configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MindmendError, Result};

/// Phase durations for a breathing cycle, in whole seconds.
///
/// The default is the 4-7-8 relaxation pattern. A zero hold is valid and
/// causes the cycle to move straight from inhale to exhale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingPattern {
    /// Inhale duration in seconds. Must be at least 1.
    pub inhale_secs: u64,
    /// Hold duration in seconds. May be 0 to skip the hold phase.
    pub hold_secs: u64,
    /// Exhale duration in seconds. Must be at least 1.
    pub exhale_secs: u64,
}

impl Default for BreathingPattern {
    fn default() -> Self {
        Self {
            inhale_secs: 4,
            hold_secs: 7,
            exhale_secs: 8,
        }
    }
}

impl BreathingPattern {
    /// Creates a pattern after validating the durations.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `inhale_secs` or `exhale_secs` is zero.
    pub fn new(inhale_secs: u64, hold_secs: u64, exhale_secs: u64) -> Result<Self> {
        let pattern = Self {
            inhale_secs,
            hold_secs,
            exhale_secs,
        };
        pattern.validate()?;
        Ok(pattern)
    }

    /// Checks that the pattern describes a usable cycle.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `inhale_secs` or `exhale_secs` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.inhale_secs == 0 {
            return Err(MindmendError::validation(
                "Inhale duration must be at least 1 second",
            ));
        }
        if self.exhale_secs == 0 {
            return Err(MindmendError::validation(
                "Exhale duration must be at least 1 second",
            ));
        }
        Ok(())
    }

    /// Inhale duration.
    pub fn inhale(&self) -> Duration {
        Duration::from_secs(self.inhale_secs)
    }

    /// Hold duration.
    pub fn hold(&self) -> Duration {
        Duration::from_secs(self.hold_secs)
    }

    /// Exhale duration.
    pub fn exhale(&self) -> Duration {
        Duration::from_secs(self.exhale_secs)
    }

    /// Total duration of one full cycle.
    pub fn cycle(&self) -> Duration {
        Duration::from_secs(self.inhale_secs + self.hold_secs + self.exhale_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_4_7_8() {
        let pattern = BreathingPattern::default();
        assert_eq!(pattern.inhale_secs, 4);
        assert_eq!(pattern.hold_secs, 7);
        assert_eq!(pattern.exhale_secs, 8);
        pattern.validate().unwrap();
    }

    #[test]
    fn test_zero_hold_is_valid() {
        let pattern = BreathingPattern::new(4, 0, 8).unwrap();
        assert_eq!(pattern.cycle(), Duration::from_secs(12));
    }

    #[test]
    fn test_zero_inhale_rejected() {
        let err = BreathingPattern::new(0, 7, 8).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_zero_exhale_rejected() {
        let err = BreathingPattern::new(4, 7, 0).unwrap_err();
        assert!(err.is_validation());
    }
}
