//! Built-in guided meditation library.

use serde::{Deserialize, Serialize};

/// Difficulty level of a meditation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeditationLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// A guided meditation session from the built-in catalog.
///
/// The catalog is static data, so sessions serialize for display but are
/// never read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeditationSession {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Session length in minutes.
    pub duration_mins: u32,
    pub level: MeditationLevel,
}

/// The built-in session catalog.
pub const MEDITATION_LIBRARY: &[MeditationSession] = &[
    MeditationSession {
        id: "morning-calm",
        title: "Morning Calm",
        description: "Start your day with a peaceful 5-minute meditation focusing on gratitude.",
        duration_mins: 5,
        level: MeditationLevel::Beginner,
    },
    MeditationSession {
        id: "stress-relief",
        title: "Stress Relief",
        description: "A 10-minute guided session to release tension and find your center.",
        duration_mins: 10,
        level: MeditationLevel::Beginner,
    },
    MeditationSession {
        id: "deep-focus",
        title: "Deep Focus",
        description: "Enhance your concentration with this 15-minute mindfulness practice.",
        duration_mins: 15,
        level: MeditationLevel::Intermediate,
    },
    MeditationSession {
        id: "sleep-well",
        title: "Sleep Well",
        description: "Prepare your mind for restful sleep with this calming 20-minute session.",
        duration_mins: 20,
        level: MeditationLevel::Intermediate,
    },
    MeditationSession {
        id: "loving-kindness",
        title: "Loving Kindness",
        description: "Cultivate compassion and love with this heartfelt 30-minute meditation.",
        duration_mins: 30,
        level: MeditationLevel::Advanced,
    },
    MeditationSession {
        id: "body-scan",
        title: "Body Scan",
        description: "A detailed 25-minute journey through your body to release tension.",
        duration_mins: 25,
        level: MeditationLevel::Advanced,
    },
];

/// Looks up a session by its ID.
pub fn find_session(id: &str) -> Option<&'static MeditationSession> {
    MEDITATION_LIBRARY.iter().find(|s| s.id == id)
}

/// Returns the sessions at a given level.
pub fn sessions_by_level(level: MeditationLevel) -> Vec<&'static MeditationSession> {
    MEDITATION_LIBRARY
        .iter()
        .filter(|s| s.level == level)
        .collect()
}
