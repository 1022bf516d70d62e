//! Unified path management for MindMend configuration and data files.
//!
//! All persistent state lives under a single per-user directory so that
//! every storage backend agrees on where files go.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/mindmend/          # Config directory
//! ├── secret.json              # API keys (mode 600 on Unix)
//! ├── storage.json             # Key-value store (session state)
//! └── journal/                 # Journal entries
//!     └── <entry-id>.json
//! ```

use std::path::{Path, PathBuf};

use mindmend_core::{MindmendError, Result, SecretConfig};

/// Resolves the locations of MindMend's persistent files.
#[derive(Debug, Clone)]
pub struct MindmendPaths {
    base_dir: PathBuf,
}

impl MindmendPaths {
    /// Creates a path resolver rooted at the platform config directory
    /// (e.g. `~/.config/mindmend/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be
    /// determined.
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MindmendError::config("Cannot find config directory"))?;
        Ok(Self {
            base_dir: config_dir.join("mindmend"),
        })
    }

    /// Creates a path resolver rooted at a custom directory.
    ///
    /// Used by tests and embedders that manage their own storage location.
    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the configuration directory.
    pub fn config_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the path to the key-value store file.
    pub fn storage_file(&self) -> PathBuf {
        self.base_dir.join("storage.json")
    }

    /// Returns the path to the journal entries directory.
    pub fn journal_dir(&self) -> PathBuf {
        self.base_dir.join("journal")
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file(&self) -> PathBuf {
        self.base_dir.join("secret.json")
    }

    /// Ensures the secret file exists, creating it with a template if it
    /// doesn't.
    ///
    /// The template contains an empty API key, so chat stays disabled until
    /// the user fills it in. On Unix the file is created with mode 600.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or its permissions
    /// cannot be set.
    pub fn ensure_secret_file(&self) -> Result<PathBuf> {
        let secret_path = self.secret_file();
        if secret_path.exists() {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            gemini: Some(mindmend_core::GeminiConfig {
                api_key: String::new(),
                model_name: Some("gemini-2.0-flash".to_string()),
            }),
        };
        let template_json = serde_json::to_string_pretty(&template)?;
        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        Ok(secret_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_under_base_dir() {
        let paths = MindmendPaths::with_base_dir("/tmp/mm-test");
        assert!(paths.storage_file().ends_with("storage.json"));
        assert!(paths.secret_file().ends_with("secret.json"));
        assert!(paths.journal_dir().ends_with("journal"));
        assert!(paths.storage_file().starts_with(paths.config_dir()));
    }

    #[test]
    fn test_ensure_secret_file_creates_template() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MindmendPaths::with_base_dir(temp_dir.path());

        let secret_path = paths.ensure_secret_file().unwrap();
        assert!(secret_path.exists());

        let content = std::fs::read_to_string(&secret_path).unwrap();
        let config: SecretConfig = serde_json::from_str(&content).unwrap();
        // Template key is empty, so the config reports no usable Gemini setup.
        assert!(config.gemini().is_none());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&secret_path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_ensure_secret_file_preserves_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MindmendPaths::with_base_dir(temp_dir.path());

        std::fs::create_dir_all(paths.config_dir()).unwrap();
        std::fs::write(paths.secret_file(), r#"{"gemini":{"api_key":"real"}}"#).unwrap();

        paths.ensure_secret_file().unwrap();

        let content = std::fs::read_to_string(paths.secret_file()).unwrap();
        assert!(content.contains("real"));
    }
}
