//! Breathing exercise: pattern configuration and the cycle engine.

pub mod engine;
pub mod pattern;
pub mod phase;

pub use engine::BreathingEngine;
pub use pattern::BreathingPattern;
pub use phase::BreathPhase;
