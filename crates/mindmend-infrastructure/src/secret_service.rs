//! Secret service implementation.
//!
//! Reads secret configuration (API keys) from `secret.json` and caches it
//! to avoid repeated file I/O.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use mindmend_core::{MindmendError, Result, SecretConfig, SecretService};

use crate::paths::MindmendPaths;

/// File-backed [`SecretService`].
///
/// The configuration is read lazily on first access and cached. There is no
/// built-in default key: a missing or unreadable file is an error, so
/// features that need a key fail closed.
#[derive(Clone)]
pub struct SecretFileService {
    path: PathBuf,
    /// Cached config after the first successful load.
    cache: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretFileService {
    /// Creates a service reading from the default secret file location.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be
    /// determined.
    pub fn new() -> Result<Self> {
        let paths = MindmendPaths::new()?;
        Ok(Self::with_path(paths.secret_file()))
    }

    /// Creates a service reading from a specific file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Arc::new(RwLock::new(None)),
        }
    }

    fn load_internal(&self) -> Result<SecretConfig> {
        {
            let cached = self.cache.read().unwrap();
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        if !self.path.exists() {
            return Err(MindmendError::config(format!(
                "Secret file not found at: {}",
                self.path.display()
            )));
        }

        let content = std::fs::read_to_string(&self.path).map_err(|err| {
            MindmendError::config(format!(
                "Failed to read secret file at {}: {}",
                self.path.display(),
                err
            ))
        })?;

        // Parse errors name the file but never echo its contents.
        let config: SecretConfig = serde_json::from_str(&content).map_err(|err| {
            MindmendError::config(format!(
                "Failed to parse secret file at {}: line {} column {}",
                self.path.display(),
                err.line(),
                err.column()
            ))
        })?;

        {
            let mut cached = self.cache.write().unwrap();
            *cached = Some(config.clone());
        }
        Ok(config)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretFileService {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_secrets() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(
            &path,
            r#"{"gemini": {"api_key": "k-123", "model_name": "gemini-2.0-flash"}}"#,
        )
        .unwrap();

        let service = SecretFileService::with_path(&path);
        assert!(service.secret_file_exists().await);

        let config = service.load_secrets().await.unwrap();
        assert_eq!(config.gemini().unwrap().api_key, "k-123");
    }

    #[tokio::test]
    async fn test_missing_file_fails_closed() {
        let temp_dir = TempDir::new().unwrap();
        let service = SecretFileService::with_path(temp_dir.path().join("secret.json"));

        assert!(!service.secret_file_exists().await);
        let err = service.load_secrets().await.unwrap_err();
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn test_parse_error_does_not_leak_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(&path, r#"{"gemini": {"api_key": "super-secret""#).unwrap();

        let service = SecretFileService::with_path(&path);
        let err = service.load_secrets().await.unwrap_err();
        assert!(!err.to_string().contains("super-secret"));
    }

    #[tokio::test]
    async fn test_cache_survives_file_deletion() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(&path, r#"{"gemini": {"api_key": "k"}}"#).unwrap();

        let service = SecretFileService::with_path(&path);
        service.load_secrets().await.unwrap();

        std::fs::remove_file(&path).unwrap();
        assert!(service.load_secrets().await.is_ok());
    }
}
