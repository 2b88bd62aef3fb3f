//! Participant and snapshot record types.
//!
//! [`Participant`] is the in-memory shape held by the ledger. It has no
//! `reward` field: the reward is derived from `level` through the
//! reward table and is recomputed at serialization time, never stored.
//! [`ParticipantRecord`] is the serialized shape -- the snapshot and
//! roster-export row -- which carries the recomputed reward for the
//! benefit of external readers.

use serde::{Deserialize, Serialize};

use crate::ids::EmployeeId;

/// A participant as held in the ledger.
///
/// Insertion order in the ledger is display order; participants are
/// addressed positionally. `level` indexes the reward table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Opaque caller-supplied identifier.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Achievement tier, an index into the reward table.
    pub level: u32,
}

/// A participant record as written to the snapshot or roster export.
///
/// The `reward` field is derived data: it is filled in from the reward
/// table when the record is produced and ignored when a record is read
/// back (the level is authoritative).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    /// Opaque caller-supplied identifier.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Achievement tier, an index into the reward table.
    pub level: u32,
    /// Reward for `level`, recomputed at serialization time.
    pub reward: i64,
}

/// The durable snapshot of a whole ledger.
///
/// This is the document the persistence gateway stores and returns.
/// On restore the budget is recomputed from the participant levels;
/// `remaining_budget` is kept in the document for external readers and
/// cross-checked against the recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// All participants, in display order.
    pub participants: Vec<ParticipantRecord>,
    /// Budget remaining after all rewards, as of the snapshot.
    pub remaining_budget: i64,
}

/// One decoded roster-import row.
///
/// `level` is `None` when the source cell was missing or unparseable;
/// the ledger's import treats that as level 0. Id and name are kept as
/// decoded, empty cells included -- the import path is deliberately
/// permissive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterRow {
    /// Raw identifier cell.
    pub id: String,
    /// Raw display-name cell.
    pub name: String,
    /// Parsed level cell, if present and numeric.
    pub level: Option<u32>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = LedgerSnapshot {
            participants: vec![ParticipantRecord {
                id: EmployeeId::from("001"),
                name: "Mei".to_owned(),
                level: 2,
                reward: 300,
            }],
            remaining_budget: 5700,
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: LedgerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn roster_row_defaults_to_empty_unleveled() {
        let row = RosterRow::default();
        assert_eq!(row.id, "");
        assert_eq!(row.name, "");
        assert_eq!(row.level, None);
    }
}
