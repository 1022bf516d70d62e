//! Secret configuration types.
//!
//! The generative-chat API key is never compiled in or defaulted. It must be
//! supplied at runtime through a [`SecretConfig`], and chat features fail
//! closed when it is absent.

use serde::{Deserialize, Serialize};

/// Root structure of `secret.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key. Required; there is no default.
    pub api_key: String,
    /// Model to use. Falls back to the client's default when absent.
    #[serde(default)]
    pub model_name: Option<String>,
}

impl SecretConfig {
    /// Returns the Gemini configuration, if present and usable.
    ///
    /// A configuration with an empty API key is treated as absent.
    pub fn gemini(&self) -> Option<&GeminiConfig> {
        self.gemini
            .as_ref()
            .filter(|config| !config.api_key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let json = r#"{"gemini": {"api_key": "test-key", "model_name": "gemini-2.0-flash"}}"#;
        let config: SecretConfig = serde_json::from_str(json).unwrap();
        let gemini = config.gemini().unwrap();
        assert_eq!(gemini.api_key, "test-key");
        assert_eq!(gemini.model_name.as_deref(), Some("gemini-2.0-flash"));
    }

    #[test]
    fn test_missing_gemini_section() {
        let config: SecretConfig = serde_json::from_str("{}").unwrap();
        assert!(config.gemini().is_none());
    }

    #[test]
    fn test_empty_api_key_treated_as_absent() {
        let json = r#"{"gemini": {"api_key": "  "}}"#;
        let config: SecretConfig = serde_json::from_str(json).unwrap();
        assert!(config.gemini().is_none());
    }
}
