//! The operator session: one ledger, one snapshot store, and the
//! policies that sit between them.
//!
//! The session owns persistence timing (save after every successful
//! mutation, warn-and-continue on failure) and the downgrade
//! confirmation gate. The ledger itself stays free of I/O and of UI
//! policy.

use std::io::{Read, Write};

use ringtoss_ledger::{Ledger, LevelChange, RewardTable};
use ringtoss_store::SnapshotStore;
use ringtoss_types::RosterRow;

use crate::config::EventConfig;
use crate::error::SessionError;

/// The operator's answer to the downgrade confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The operator confirmed the downgrade.
    Confirmed,
    /// The operator declined, or was never asked.
    Declined,
}

/// An operator session over one event's ledger.
///
/// All mutating operations persist the new snapshot on success. A
/// persistence failure is logged as a warning and does not roll back
/// or fail the operation: the in-memory ledger stays authoritative for
/// the rest of the session.
#[derive(Debug)]
pub struct Session<S: SnapshotStore> {
    /// The authoritative ledger.
    ledger: Ledger,
    /// Durable snapshot storage.
    store: S,
}

impl<S: SnapshotStore> Session<S> {
    /// Open a session: build the reward table from configuration and
    /// seed the ledger from the stored snapshot, if one exists.
    ///
    /// An unreadable store is logged as a warning and the session
    /// starts empty (the store stays in place and is overwritten on
    /// the next successful mutation). A snapshot that no longer fits
    /// the configured pool is an error -- silently discarding a roster
    /// is worse than refusing to start.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Ledger`] for an invalid reward table or
    /// budget, or for a snapshot the configuration cannot accommodate.
    pub fn open(config: &EventConfig, store: S) -> Result<Self, SessionError> {
        let table = RewardTable::new(config.event.level_rewards.clone())?;
        let max_budget = config.event.max_budget;

        let snapshot = match store.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "Could not load snapshot; starting empty");
                None
            }
        };

        let ledger = match snapshot {
            Some(snapshot) => Ledger::restore(table, max_budget, &snapshot)?,
            None => Ledger::new(table, max_budget)?,
        };

        tracing::info!(
            participants = ledger.len(),
            remaining = ledger.remaining_budget(),
            "Session opened"
        );
        Ok(Self { ledger, store })
    }

    /// The ledger, for reads.
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The snapshot store, for reads.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Add a participant at level 0.
    ///
    /// Returns `true` if a participant was added. Blank name or id is
    /// the usual silent no-op and does not persist anything.
    pub fn add_participant(&mut self, name: &str, id: &str) -> bool {
        if self.ledger.add_participant(name, id).is_none() {
            return false;
        }
        self.persist();
        true
    }

    /// Plan a level change, so the caller can see whether it needs the
    /// downgrade prompt before committing via [`set_level`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Ledger`] for an invalid index or level,
    /// or an insufficient budget.
    ///
    /// [`set_level`]: Session::set_level
    pub fn plan_set_level(
        &self,
        index: usize,
        new_level: u32,
    ) -> Result<LevelChange, SessionError> {
        Ok(self.ledger.plan_level_change(index, new_level)?)
    }

    /// Change a participant's level.
    ///
    /// A downgrade commits only with [`Confirmation::Confirmed`];
    /// otherwise the operation aborts with
    /// [`SessionError::DowngradeDeclined`] and nothing changes.
    /// Upgrades ignore the confirmation argument.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Ledger`] for an invalid index or level
    /// or an insufficient budget, and
    /// [`SessionError::DowngradeDeclined`] for an unconfirmed
    /// downgrade.
    pub fn set_level(
        &mut self,
        index: usize,
        new_level: u32,
        confirmation: Confirmation,
    ) -> Result<(), SessionError> {
        let plan = self.ledger.plan_level_change(index, new_level)?;
        if plan.is_downgrade() && confirmation != Confirmation::Confirmed {
            tracing::debug!(index, new_level, "Downgrade declined");
            return Err(SessionError::DowngradeDeclined);
        }

        self.ledger.commit_level_change(&plan)?;
        self.persist();
        Ok(())
    }

    /// Import a roster file, replacing the current roster wholesale.
    ///
    /// Returns the number of imported participants. Rows whose level
    /// is outside the reward table are imported with reward 0 and
    /// logged as warnings, so a partially corrupt file is visible
    /// without being rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Roster`] for an undecodable file and
    /// [`SessionError::Ledger`] if the roster's reward total exceeds
    /// the pool (the existing roster is untouched).
    pub fn import_roster<R: Read>(&mut self, reader: R) -> Result<usize, SessionError> {
        let rows = ringtoss_roster::decode(reader)?;
        self.warn_on_unknown_levels(&rows);

        self.ledger.bulk_replace(&rows)?;
        self.persist();
        Ok(rows.len())
    }

    /// Export the current roster, rewards recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Roster`] if writing the file fails.
    pub fn export_roster<W: Write>(&self, writer: W) -> Result<(), SessionError> {
        Ok(ringtoss_roster::encode(&self.ledger.records(), writer)?)
    }

    /// Clear the roster, restore the full pool, and remove the stored
    /// snapshot. The caller is expected to have confirmed this with
    /// the operator; the session does not second-guess it.
    pub fn reset(&mut self) {
        self.ledger.reset();
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Could not clear stored snapshot");
        }
    }

    /// Log a warning for every import row whose level the reward table
    /// does not know. Such rows are debited 0, which is usually a sign
    /// of a corrupted or mismatched roster file.
    fn warn_on_unknown_levels(&self, rows: &[RosterRow]) {
        for (index, row) in rows.iter().enumerate() {
            if let Some(level) = row.level {
                if self.ledger.table().reward_for(level).is_err() {
                    tracing::warn!(
                        row = index,
                        id = %row.id,
                        level,
                        "Import row has a level outside the reward table; rewarding 0"
                    );
                }
            }
        }
    }

    /// Save the current snapshot, warning instead of failing.
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.ledger.snapshot()) {
            tracing::warn!(error = %e, "Could not persist snapshot; in-memory state is authoritative");
        }
    }
}
