//! In-process snapshot store for tests.

use ringtoss_types::LedgerSnapshot;

use crate::{SnapshotStore, StoreError};

/// Snapshot store that keeps the document in memory.
///
/// Used by session tests. `fail_next_save` makes the next save return
/// an I/O error, for exercising the warn-and-continue persistence
/// policy.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// The currently stored snapshot, if any.
    snapshot: Option<LedgerSnapshot>,
    /// Number of successful saves, for assertions.
    saves: usize,
    /// Whether the next save should fail.
    fail_next_save: bool,
}

impl MemoryStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            snapshot: None,
            saves: 0,
            fail_next_save: false,
        }
    }

    /// Number of successful saves so far.
    pub const fn saves(&self) -> usize {
        self.saves
    }

    /// The currently stored snapshot, if any.
    pub const fn stored(&self) -> Option<&LedgerSnapshot> {
        self.snapshot.as_ref()
    }

    /// Make the next save fail with an I/O error.
    pub const fn fail_next_save(&mut self) {
        self.fail_next_save = true;
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>, StoreError> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &LedgerSnapshot) -> Result<(), StoreError> {
        if self.fail_next_save {
            self.fail_next_save = false;
            return Err(StoreError::Io(std::io::Error::other(
                "simulated save failure",
            )));
        }
        self.snapshot = Some(snapshot.clone());
        self.saves = self.saves.saturating_add(1);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.snapshot = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let snapshot = LedgerSnapshot {
            participants: vec![],
            remaining_budget: 6000,
        };
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn failure_is_one_shot() {
        let mut store = MemoryStore::new();
        store.fail_next_save();

        let snapshot = LedgerSnapshot {
            participants: vec![],
            remaining_budget: 6000,
        };
        assert!(store.save(&snapshot).is_err());
        assert!(store.save(&snapshot).is_ok());
        assert_eq!(store.saves(), 1);
    }
}
