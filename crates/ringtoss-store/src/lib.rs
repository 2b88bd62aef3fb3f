//! Snapshot persistence gateway for the Ringtoss prize-game ledger.
//!
//! The ledger treats durable storage as an opaque collaborator: it
//! hands over a [`LedgerSnapshot`] after every successful mutation and
//! asks for one back at startup. This crate provides the seam --
//! the [`SnapshotStore`] trait -- and two implementations:
//!
//! - [`JsonFileStore`] -- a JSON document at a configured path, written
//!   atomically (temp file, then rename) so a crash mid-save never
//!   leaves a torn snapshot on disk.
//! - [`MemoryStore`] -- an in-process store for tests.
//!
//! A store failure is never fatal to the caller: the session logs it
//! as a warning and the in-memory ledger stays authoritative.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use ringtoss_types::LedgerSnapshot;

/// Errors that can occur in the persistence gateway.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be (de)serialized.
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable load/save/clear of the ledger's snapshot.
///
/// `load` is called once at startup to seed initial state; `save`
/// after every successful mutation; `clear` when the operator resets
/// the event.
pub trait SnapshotStore {
    /// Load the stored snapshot, or `None` if nothing is stored.
    fn load(&self) -> Result<Option<LedgerSnapshot>, StoreError>;

    /// Store a snapshot, replacing any previous one.
    fn save(&mut self, snapshot: &LedgerSnapshot) -> Result<(), StoreError>;

    /// Remove the stored snapshot. Succeeds if nothing is stored.
    fn clear(&mut self) -> Result<(), StoreError>;
}
