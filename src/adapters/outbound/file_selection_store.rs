//! File Selection Store
//!
//! Implements SelectionStore as a JSON file so the selected location
//! survives restarts.

use crate::domain::entities::SelectedLocation;
use crate::domain::errors::StoreError;
use crate::domain::ports::SelectionStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

/// Durable selection store backed by a JSON file.
///
/// The file is read once at open and written through on every `set`.
/// Reads are served from memory.
pub struct FileSelectionStore {
    path: PathBuf,
    current: RwLock<Option<SelectedLocation>>,
    // Serializes `set` so memory and disk see writes in the same order
    write_lock: tokio::sync::Mutex<()>,
}

impl FileSelectionStore {
    /// Open the store, loading any selection already on disk.
    ///
    /// A missing file starts empty. An unreadable or corrupt file is
    /// logged and also starts empty; it is replaced on the next `set`.
    pub async fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        let current = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<SelectedLocation>(&bytes) {
                Ok(location) => {
                    tracing::debug!("loaded selected location {} from {:?}", location.id(), path);
                    Some(location)
                }
                Err(e) => {
                    tracing::warn!("ignoring corrupt selection file {:?}: {}", path, e);
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("cannot read selection file {:?}: {}", path, e);
                None
            }
        };

        Self {
            path,
            current: RwLock::new(current),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, location: &SelectedLocation) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(location)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write-then-rename so a crash never leaves a half-written file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SelectionStore for FileSelectionStore {
    async fn get(&self) -> Option<SelectedLocation> {
        self.current.read().clone()
    }

    /// Updates memory first so the session sees the new selection even
    /// when the write to disk fails. Concurrent calls are applied one at
    /// a time; the last one to take the lock wins in memory and on disk.
    async fn set(&self, location: SelectedLocation) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        *self.current.write() = Some(location.clone());
        self.persist(&location).await
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::entities::{City, Country};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSelectionStore::open(dir.path().join("selection.json")).await;

        assert!(store.get().await.is_none());
    }

    #[tokio::test]
    async fn test_set_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selection.json");

        let store = FileSelectionStore::open(&path).await;
        let jeddah = SelectedLocation::City(City::new("2", "Jeddah", "jeddah", "r2"));
        store.set(jeddah.clone()).await.unwrap();

        let reopened = FileSelectionStore::open(&path).await;
        assert_eq!(reopened.get().await, Some(jeddah));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_set_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state/selection.json");

        let store = FileSelectionStore::open(&path).await;
        store
            .set(SelectedLocation::Country(Country {
                id: "sa".into(),
                name: "Saudi Arabia".into(),
                slug: Some("saudi-arabia".into()),
                code: Some("SA".into()),
            }))
            .await
            .unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selection.json");
        std::fs::write(&path, b"{not json").unwrap();

        let store = FileSelectionStore::open(&path).await;
        assert!(store.get().await.is_none());

        let riyadh = SelectedLocation::City(City::new("1", "Riyadh", "riyadh", "r1"));
        store.set(riyadh.clone()).await.unwrap();

        let on_disk: SelectedLocation =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk, riyadh);
    }

    #[tokio::test]
    async fn test_write_failure_keeps_selection_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let store = FileSelectionStore::open(blocker.join("selection.json")).await;
        assert!(store.get().await.is_none());
        let riyadh = SelectedLocation::City(City::new("1", "Riyadh", "riyadh", "r1"));

        assert!(store.set(riyadh.clone()).await.is_err());
        assert_eq!(store.get().await, Some(riyadh));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sets_agree_in_memory_and_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selection.json");
        let store = Arc::new(FileSelectionStore::open(&path).await);

        for round in 0..20 {
            let writers: Vec<_> = (0..8)
                .map(|i| {
                    let store = store.clone();
                    let id = format!("{}-{}", round, i);
                    tokio::spawn(async move {
                        store
                            .set(SelectedLocation::City(City::new(&id, "City", "city", "r1")))
                            .await
                    })
                })
                .collect();

            for result in futures::future::join_all(writers).await {
                assert!(result.unwrap().is_ok());
            }

            let in_memory = store.get().await;
            let reopened = FileSelectionStore::open(&path).await;
            assert_eq!(reopened.get().await, in_memory);
        }
        assert!(!path.with_extension("json.tmp").exists());
    }
}
