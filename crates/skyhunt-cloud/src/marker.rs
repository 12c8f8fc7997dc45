//! Completion marker storage
//!
//! Durable record of "an instance with this display name was created",
//! read at the start of every pass and written at most once per success.
//! The default backing is a JSON file per display name under
//! `.skyhunt/completed/`; any key-value store satisfies the trait.

use crate::error::{CloudError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

const MARKER_DIR: &str = ".skyhunt";
const COMPLETED_DIR: &str = "completed";

/// The persisted fact of a successful creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// OCID of the created instance
    pub instance_id: String,

    /// When the record was written
    pub created_at: DateTime<Utc>,
}

impl CompletionRecord {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            created_at: Utc::now(),
        }
    }
}

/// Durable completion store, keyed by instance display name.
///
/// The engine only ever calls `exists`, `read` and `record`; `clear` is an
/// operator action (after terminating the real instance).
#[async_trait]
pub trait CompletionMarker: Send + Sync {
    async fn exists(&self, key: &str) -> Result<bool>;

    async fn read(&self, key: &str) -> Result<Option<CompletionRecord>>;

    /// Write-or-fail: a lost write here means a real instance exists
    /// unrecorded, so failures must surface, never be swallowed.
    async fn record(&self, key: &str, record: &CompletionRecord) -> Result<()>;

    async fn clear(&self, key: &str) -> Result<()>;
}

/// File-backed marker store rooted at a state directory
pub struct FileMarker {
    state_root: PathBuf,
}

impl FileMarker {
    pub fn new(state_root: impl AsRef<Path>) -> Self {
        Self {
            state_root: state_root.as_ref().to_path_buf(),
        }
    }

    fn completed_dir(&self) -> PathBuf {
        self.state_root.join(MARKER_DIR).join(COMPLETED_DIR)
    }

    /// Path of the marker file for a display name. Display names are
    /// sanitized so a hostile name cannot escape the marker directory.
    pub fn marker_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.completed_dir().join(format!("{safe}.json"))
    }

    async fn ensure_dir(&self) -> Result<()> {
        let dir = self.completed_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir).await?;
            tracing::debug!("Created marker directory: {}", dir.display());
        }
        Ok(())
    }
}

#[async_trait]
impl CompletionMarker for FileMarker {
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.marker_path(key).exists())
    }

    async fn read(&self, key: &str) -> Result<Option<CompletionRecord>> {
        let path = self.marker_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await?;
        let record: CompletionRecord = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    async fn record(&self, key: &str, record: &CompletionRecord) -> Result<()> {
        self.ensure_dir().await?;

        let path = self.marker_path(key);
        let content = serde_json::to_string_pretty(record)?;
        fs::write(&path, content).await?;

        tracing::debug!(
            "Recorded completion for '{}' ({}) at {}",
            key,
            record.instance_id,
            path.display()
        );
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        let path = self.marker_path(key);
        if path.exists() {
            fs::remove_file(&path).await?;
            tracing::info!("Cleared completion marker for '{}'", key);
        }
        Ok(())
    }
}

/// In-memory marker store for tests and ephemeral use
#[derive(Default)]
pub struct MemoryMarker {
    records: std::sync::Mutex<std::collections::HashMap<String, CompletionRecord>>,
}

impl MemoryMarker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, std::collections::HashMap<String, CompletionRecord>>>
    {
        self.records
            .lock()
            .map_err(|_| CloudError::MarkerStore("marker store poisoned".to_string()))
    }
}

#[async_trait]
impl CompletionMarker for MemoryMarker {
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.lock()?.contains_key(key))
    }

    async fn read(&self, key: &str) -> Result<Option<CompletionRecord>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn record(&self, key: &str, record: &CompletionRecord) -> Result<()> {
        self.lock()?.insert(key.to_string(), record.clone());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_record_then_exists_and_read() {
        let temp_dir = tempdir().unwrap();
        let marker = FileMarker::new(temp_dir.path());

        assert!(!marker.exists("my-free-instance").await.unwrap());

        let record = CompletionRecord::new("ocid1.instance.oc1..abc");
        marker.record("my-free-instance", &record).await.unwrap();

        assert!(marker.exists("my-free-instance").await.unwrap());
        let loaded = marker.read("my-free-instance").await.unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_record_is_idempotent_for_same_id() {
        let temp_dir = tempdir().unwrap();
        let marker = FileMarker::new(temp_dir.path());

        let record = CompletionRecord::new("inst-123");
        marker.record("d", &record).await.unwrap();
        marker.record("d", &record).await.unwrap();

        let loaded = marker.read("d").await.unwrap().unwrap();
        assert_eq!(loaded.instance_id, "inst-123");
    }

    #[tokio::test]
    async fn test_clear_removes_marker() {
        let temp_dir = tempdir().unwrap();
        let marker = FileMarker::new(temp_dir.path());

        marker
            .record("gone", &CompletionRecord::new("inst-1"))
            .await
            .unwrap();
        marker.clear("gone").await.unwrap();

        assert!(!marker.exists("gone").await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_missing_key_is_ok() {
        let temp_dir = tempdir().unwrap();
        let marker = FileMarker::new(temp_dir.path());
        marker.clear("never-recorded").await.unwrap();
    }

    #[test]
    fn test_marker_path_sanitizes_key() {
        let marker = FileMarker::new("/tmp/state");
        let path = marker.marker_path("../../etc/passwd");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(name, "______etc_passwd.json");
        assert!(path.starts_with("/tmp/state/.skyhunt/completed"));
    }

    #[tokio::test]
    async fn test_memory_marker_roundtrip() {
        let marker = MemoryMarker::new();
        assert!(!marker.exists("k").await.unwrap());
        marker.record("k", &CompletionRecord::new("i-1")).await.unwrap();
        assert!(marker.exists("k").await.unwrap());
        marker.clear("k").await.unwrap();
        assert!(!marker.exists("k").await.unwrap());
    }
}
