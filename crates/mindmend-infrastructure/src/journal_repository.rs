//! File-backed journal repository.

use std::path::{Path, PathBuf};

use mindmend_core::{JournalEntry, JournalRepository, MindmendError, Result};

/// Stores each journal entry as `<entry-id>.json` in a directory.
pub struct JsonJournalRepository {
    dir: PathBuf,
}

impl JsonJournalRepository {
    /// Opens a repository at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn entry_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn load_entry(&self, path: &Path) -> Result<JournalEntry> {
        let json = std::fs::read_to_string(path)?;
        let entry = serde_json::from_str(&json)?;
        Ok(entry)
    }
}

#[async_trait::async_trait]
impl JournalRepository for JsonJournalRepository {
    async fn save(&self, entry: &JournalEntry) -> Result<()> {
        let json = serde_json::to_string_pretty(entry)?;
        std::fs::write(self.entry_path(&entry.id), json)?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<JournalEntry>> {
        let mut entries = Vec::new();
        for dir_entry in std::fs::read_dir(&self.dir)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                match self.load_entry(&path) {
                    Ok(entry) => entries.push(entry),
                    Err(err) => {
                        tracing::warn!(path = %path.display(), error = %err, "skipping unreadable journal entry");
                    }
                }
            }
        }
        Ok(entries)
    }

    async fn get(&self, id: &str) -> Result<JournalEntry> {
        let path = self.entry_path(id);
        if !path.exists() {
            return Err(MindmendError::not_found("journal entry", id));
        }
        self.load_entry(&path)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let path = self.entry_path(id);
        if !path.exists() {
            return Err(MindmendError::not_found("journal entry", id));
        }
        std::fs::remove_file(path)?;
        Ok(())
    }
}
