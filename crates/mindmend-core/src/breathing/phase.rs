//! Breathing cycle phases.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A phase of the breathing cycle.
///
/// The engine moves `Inhale -> Hold -> Exhale` and back to `Inhale` while
/// running, skipping `Hold` when the pattern's hold duration is zero. `Idle`
/// is the resting state before start and after stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreathPhase {
    /// Not running.
    Idle,
    /// Breathing in.
    Inhale,
    /// Holding the breath.
    Hold,
    /// Breathing out.
    Exhale,
}

impl BreathPhase {
    /// Returns the on-screen instruction for this phase.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Idle => "Get ready to breathe...",
            Self::Inhale => "Breathe in slowly through your nose...",
            Self::Hold => "Hold your breath...",
            Self::Exhale => "Exhale slowly through your mouth...",
        }
    }
}

impl fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "Idle",
            Self::Inhale => "Inhale",
            Self::Hold => "Hold",
            Self::Exhale => "Exhale",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions() {
        assert_eq!(BreathPhase::Idle.instruction(), "Get ready to breathe...");
        assert_eq!(
            BreathPhase::Inhale.instruction(),
            "Breathe in slowly through your nose..."
        );
        assert_eq!(BreathPhase::Hold.instruction(), "Hold your breath...");
        assert_eq!(
            BreathPhase::Exhale.instruction(),
            "Exhale slowly through your mouth..."
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(BreathPhase::Inhale.to_string(), "Inhale");
        assert_eq!(BreathPhase::Idle.to_string(), "Idle");
    }
}
