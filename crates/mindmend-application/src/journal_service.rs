//! Journal use case: entry creation and listing with user feedback.

use std::sync::Arc;

use mindmend_core::{JournalEntry, JournalRepository, Notification, Notifier, Result};

/// Coordinates journal entries between validation, persistence, and
/// notifications.
pub struct JournalService {
    repository: Arc<dyn JournalRepository>,
    notifier: Arc<dyn Notifier>,
}

impl JournalService {
    pub fn new(repository: Arc<dyn JournalRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Validates and saves a new entry.
    ///
    /// On success an informational notification is emitted; on validation
    /// failure a destructive one carries the error message.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank title/content or an
    /// out-of-range mood, or a storage error if the entry cannot be saved.
    pub async fn add_entry(
        &self,
        title: &str,
        content: &str,
        mood: u8,
        activities: Vec<String>,
    ) -> Result<JournalEntry> {
        let entry = match JournalEntry::new(title, content, mood, activities) {
            Ok(entry) => entry,
            Err(err) => {
                self.notifier
                    .notify(Notification::destructive("Cannot save entry", err.to_string()));
                return Err(err);
            }
        };

        self.repository.save(&entry).await?;
        self.notifier.notify(Notification::info(
            "Entry saved",
            "Your journal entry has been added to your log book.",
        ));
        tracing::info!(id = %entry.id, "journal entry saved");
        Ok(entry)
    }

    /// Returns all entries, newest first.
    pub async fn list_entries(&self) -> Result<Vec<JournalEntry>> {
        let mut entries = self.repository.list().await?;
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    /// Deletes an entry by ID.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no entry has that ID.
    pub async fn delete_entry(&self, id: &str) -> Result<()> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use mindmend_core::{MindmendError, Severity};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryRepository {
        entries: Mutex<HashMap<String, JournalEntry>>,
    }

    #[async_trait::async_trait]
    impl JournalRepository for MemoryRepository {
        async fn save(&self, entry: &JournalEntry) -> Result<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(entry.id.clone(), entry.clone());
            Ok(())
        }

        async fn list(&self) -> Result<Vec<JournalEntry>> {
            Ok(self.entries.lock().unwrap().values().cloned().collect())
        }

        async fn get(&self, id: &str) -> Result<JournalEntry> {
            self.entries
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| MindmendError::not_found("journal entry", id))
        }

        async fn delete(&self, id: &str) -> Result<()> {
            self.entries
                .lock()
                .unwrap()
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| MindmendError::not_found("journal entry", id))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notifications: Mutex<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.notifications.lock().unwrap().push(notification);
        }
    }

    fn service() -> (Arc<MemoryRepository>, Arc<RecordingNotifier>, JournalService) {
        let repository = Arc::new(MemoryRepository::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = JournalService::new(repository.clone(), notifier.clone());
        (repository, notifier, service)
    }

    #[tokio::test]
    async fn test_add_entry_saves_and_notifies() {
        let (repository, notifier, service) = service();

        let entry = service
            .add_entry(
                "My First Mindfulness Day",
                "Today I tried meditation.",
                4,
                vec!["Meditation".to_string()],
            )
            .await
            .unwrap();

        assert!(repository.get(&entry.id).await.is_ok());

        let notifications = notifier.notifications.lock().unwrap();
        assert_eq!(notifications[0].severity, Severity::Info);
        assert_eq!(notifications[0].title, "Entry saved");
        assert_eq!(
            notifications[0].description,
            "Your journal entry has been added to your log book."
        );
    }

    #[tokio::test]
    async fn test_add_entry_rejects_blank_title() {
        let (repository, notifier, service) = service();

        let err = service.add_entry("", "content", 3, vec![]).await.unwrap_err();
        assert!(err.is_validation());
        assert!(repository.list().await.unwrap().is_empty());

        let notifications = notifier.notifications.lock().unwrap();
        assert_eq!(notifications[0].severity, Severity::Destructive);
        assert_eq!(notifications[0].title, "Cannot save entry");
    }

    #[tokio::test]
    async fn test_list_entries_newest_first() {
        let (repository, _, service) = service();

        let mut old = JournalEntry::new("old", "c", 3, vec![]).unwrap();
        old.date = Utc::now() - Duration::days(2);
        let mut middle = JournalEntry::new("middle", "c", 3, vec![]).unwrap();
        middle.date = Utc::now() - Duration::days(1);
        let new = JournalEntry::new("new", "c", 3, vec![]).unwrap();

        repository.save(&old).await.unwrap();
        repository.save(&new).await.unwrap();
        repository.save(&middle).await.unwrap();

        let titles: Vec<_> = service
            .list_entries()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["new", "middle", "old"]);
    }

    #[tokio::test]
    async fn test_delete_missing_entry() {
        let (_, _, service) = service();
        let err = service.delete_entry("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
