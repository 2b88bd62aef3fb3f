//! JSON-file snapshot store.
//!
//! One pretty-printed JSON document per event, at a path from the
//! configuration. Saves go through a sibling temp file followed by a
//! rename, so readers only ever see a complete document.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ringtoss_types::LedgerSnapshot;

use crate::{SnapshotStore, StoreError};

/// Snapshot store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Where the snapshot document lives.
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the given snapshot path.
    ///
    /// The file need not exist yet; [`SnapshotStore::load`] reports a
    /// missing file as `None`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The sibling path used for the atomic write.
    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.as_os_str().to_owned();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_str(&contents)?;
        tracing::debug!(path = %self.path.display(), "Loaded snapshot");
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &LedgerSnapshot) -> Result<(), StoreError> {
        let document = serde_json::to_string_pretty(snapshot)?;
        let temp = self.temp_path();
        fs::write(&temp, document)?;
        fs::rename(&temp, &self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            participants = snapshot.participants.len(),
            remaining = snapshot.remaining_budget,
            "Saved snapshot"
        );
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Cleared snapshot");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ringtoss_types::{EmployeeId, ParticipantRecord};

    use super::*;

    fn snapshot() -> LedgerSnapshot {
        LedgerSnapshot {
            participants: vec![ParticipantRecord {
                id: EmployeeId::from("001"),
                name: "Mei".to_owned(),
                level: 3,
                reward: 500,
            }],
            remaining_budget: 5500,
        }
    }

    #[test]
    fn load_of_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("ledger.json"));

        store.save(&snapshot()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, Some(snapshot()));
    }

    #[test]
    fn save_replaces_the_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("ledger.json"));

        store.save(&snapshot()).unwrap();
        let mut updated = snapshot();
        updated.remaining_budget = 5900;
        store.save(&updated).unwrap();

        assert_eq!(store.load().unwrap(), Some(updated));
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("ledger.json"));

        store.save(&snapshot()).unwrap();
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn clear_removes_the_file_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("ledger.json"));

        // Clearing an empty store is fine.
        store.clear().unwrap();

        store.save(&snapshot()).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        // And clearing again is still fine.
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_document_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(path);
        assert!(matches!(
            store.load(),
            Err(StoreError::Serialization(_))
        ));
    }
}
