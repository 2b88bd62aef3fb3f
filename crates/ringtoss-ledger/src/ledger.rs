//! The reward ledger: participants, the shared budget pool, and every
//! mutating operation.
//!
//! # Design
//!
//! - **Check-then-commit**: every operation validates in full before it
//!   mutates anything; a failed operation leaves the ledger untouched.
//! - **Positional addressing**: participants are addressed by their
//!   position in the roster. Insertion order is display order.
//! - **Derived rewards**: a participant stores only its level. Reward
//!   amounts are recomputed from the [`RewardTable`] whenever a record
//!   or snapshot is produced, so a stale cached reward cannot exist.
//! - **No I/O**: persistence and import/export formats live behind the
//!   gateway and codec crates; the ledger only sees decoded rows and
//!   produces snapshot documents.

use ringtoss_types::{EmployeeId, LedgerSnapshot, Participant, ParticipantRecord, RosterRow};

use crate::reconcile::{verify_budget, BudgetCheck};
use crate::rewards::RewardTable;
use crate::LedgerError;

// ---------------------------------------------------------------------------
// Level-change plan
// ---------------------------------------------------------------------------

/// A validated, not-yet-applied level change.
///
/// Produced by [`Ledger::plan_level_change`]; mutates nothing. The
/// caller inspects [`is_downgrade`] to decide whether to ask the
/// operator for confirmation, then applies the plan with
/// [`Ledger::commit_level_change`].
///
/// [`is_downgrade`]: LevelChange::is_downgrade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelChange {
    /// Position of the participant in the roster.
    pub index: usize,
    /// The participant's level at planning time.
    pub current_level: u32,
    /// The requested level.
    pub new_level: u32,
    /// Reward currently debited for this participant.
    pub current_reward: i64,
    /// Reward the new level would debit.
    pub new_reward: i64,
    /// What the remaining budget becomes if the plan is committed.
    pub budget_after: i64,
}

impl LevelChange {
    /// Whether the plan lowers the participant's level.
    ///
    /// Downgrades require operator confirmation before commit; that
    /// policy is owned entirely by the caller.
    pub const fn is_downgrade(&self) -> bool {
        self.new_level < self.current_level
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The authoritative in-memory record of participants and the shared
/// budget pool.
///
/// The ledger enforces two invariants after every operation:
/// 1. `remaining_budget >= 0`.
/// 2. `remaining_budget == max_budget - sum(reward of each participant)`.
///
/// Both hold atomically: no operation exposes a state where one half
/// has changed and the other has not.
#[derive(Debug, Clone)]
pub struct Ledger {
    /// The fixed level-to-reward mapping.
    table: RewardTable,
    /// The configured budget pool.
    max_budget: i64,
    /// Budget remaining after all current rewards.
    remaining_budget: i64,
    /// All participants, in display order.
    participants: Vec<Participant>,
}

impl Ledger {
    /// Create an empty ledger with the full budget pool available.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeBudget`] if `max_budget` is
    /// negative.
    pub fn new(table: RewardTable, max_budget: i64) -> Result<Self, LedgerError> {
        if max_budget < 0 {
            return Err(LedgerError::NegativeBudget { max_budget });
        }
        Ok(Self {
            table,
            max_budget,
            remaining_budget: max_budget,
            participants: Vec::new(),
        })
    }

    /// Restore a ledger from a persisted snapshot.
    ///
    /// The stored levels are authoritative; rewards and the remaining
    /// budget are recomputed from them. A stored `remaining_budget`
    /// that disagrees with the recomputation is logged as a warning and
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeBudget`] for a negative pool and
    /// [`LedgerError::BudgetExceeded`] if the snapshot's recomputed
    /// reward total no longer fits the configured pool.
    pub fn restore(
        table: RewardTable,
        max_budget: i64,
        snapshot: &LedgerSnapshot,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Self::new(table, max_budget)?;

        let rows: Vec<RosterRow> = snapshot
            .participants
            .iter()
            .map(|record| RosterRow {
                id: record.id.as_str().to_owned(),
                name: record.name.clone(),
                level: Some(record.level),
            })
            .collect();
        ledger.bulk_replace(&rows)?;

        if snapshot.remaining_budget != ledger.remaining_budget {
            tracing::warn!(
                stored = snapshot.remaining_budget,
                recomputed = ledger.remaining_budget,
                "Stored budget disagrees with recomputation; using recomputed value"
            );
        }

        Ok(ledger)
    }

    /// The reward table this ledger was built with.
    pub const fn table(&self) -> &RewardTable {
        &self.table
    }

    /// The configured budget pool.
    pub const fn max_budget(&self) -> i64 {
        self.max_budget
    }

    /// Budget remaining after all current rewards.
    pub const fn remaining_budget(&self) -> i64 {
        self.remaining_budget
    }

    /// All participants, in display order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Return the number of participants.
    pub const fn len(&self) -> usize {
        self.participants.len()
    }

    /// Return whether the roster is empty.
    pub const fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// The reward currently debited for a participant.
    ///
    /// Uses the permissive lookup: a participant that entered through a
    /// roster import with an unknown level carries a reward of 0.
    pub fn reward_of(&self, participant: &Participant) -> i64 {
        self.table.reward_or_zero(participant.level)
    }

    /// Produce the export/snapshot records, rewards recomputed.
    pub fn records(&self) -> Vec<ParticipantRecord> {
        self.participants
            .iter()
            .map(|p| ParticipantRecord {
                id: p.id.clone(),
                name: p.name.clone(),
                level: p.level,
                reward: self.reward_of(p),
            })
            .collect()
    }

    /// Produce the snapshot document for the persistence gateway.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            participants: self.records(),
            remaining_budget: self.remaining_budget,
        }
    }

    /// Add a participant at level 0.
    ///
    /// Both `name` and `id` are trimmed; if either is empty after
    /// trimming the call is a silent no-op and returns `None`. This is
    /// deliberate: a blank add from the operator form is dropped
    /// without ceremony rather than surfaced as an error.
    ///
    /// Level 0 costs nothing, so the budget is untouched. No uniqueness
    /// check is made on `id`; duplicates are permitted.
    pub fn add_participant(&mut self, name: &str, id: &str) -> Option<&Participant> {
        let name = name.trim();
        let id = id.trim();
        if name.is_empty() || id.is_empty() {
            tracing::debug!("Ignored participant add with blank name or id");
            return None;
        }

        self.participants.push(Participant {
            id: EmployeeId::from(id),
            name: name.to_owned(),
            level: 0,
        });
        tracing::debug!(id, name, "Added participant at level 0");
        self.participants.last()
    }

    /// Plan a level change without applying it.
    ///
    /// Validates the index, the new level, and the budget, and reports
    /// what the change would do. The current reward uses the permissive
    /// lookup (an imported unknown level counts as 0, exactly as it was
    /// debited); the new level must be a valid table index.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NoSuchParticipant`],
    /// [`LedgerError::InvalidLevel`], or
    /// [`LedgerError::InsufficientBudget`]. Nothing is mutated on any
    /// path.
    pub fn plan_level_change(
        &self,
        index: usize,
        new_level: u32,
    ) -> Result<LevelChange, LedgerError> {
        let participant =
            self.participants
                .get(index)
                .ok_or(LedgerError::NoSuchParticipant {
                    index,
                    len: self.participants.len(),
                })?;

        let current_reward = self.table.reward_or_zero(participant.level);
        let new_reward = self.table.reward_for(new_level)?;

        // candidate = remaining - new_reward + current_reward
        let budget_after = self
            .remaining_budget
            .checked_add(current_reward)
            .and_then(|b| b.checked_sub(new_reward))
            .ok_or(LedgerError::ArithmeticOverflow)?;

        if budget_after < 0 {
            return Err(LedgerError::InsufficientBudget {
                shortfall: budget_after.saturating_neg(),
                remaining: self.remaining_budget,
            });
        }

        Ok(LevelChange {
            index,
            current_level: participant.level,
            new_level,
            current_reward,
            new_reward,
            budget_after,
        })
    }

    /// Apply a planned level change.
    ///
    /// The plan is re-validated against the current state, then the
    /// participant's level and the remaining budget change together in
    /// one indivisible step. A failed commit leaves both untouched.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`plan_level_change`], plus
    /// [`LedgerError::StalePlan`] if the participant's level moved
    /// since the plan was made.
    ///
    /// [`plan_level_change`]: Ledger::plan_level_change
    pub fn commit_level_change(&mut self, change: &LevelChange) -> Result<(), LedgerError> {
        let fresh = self.plan_level_change(change.index, change.new_level)?;
        if fresh.current_level != change.current_level {
            return Err(LedgerError::StalePlan {
                index: change.index,
            });
        }

        let len = self.participants.len();
        let participant =
            self.participants
                .get_mut(fresh.index)
                .ok_or(LedgerError::NoSuchParticipant {
                    index: fresh.index,
                    len,
                })?;
        participant.level = fresh.new_level;
        self.remaining_budget = fresh.budget_after;

        tracing::debug!(
            index = fresh.index,
            from = fresh.current_level,
            to = fresh.new_level,
            remaining = self.remaining_budget,
            "Committed level change"
        );
        Ok(())
    }

    /// Replace the whole roster with imported rows.
    ///
    /// This is a full replace, never a merge. Per row: a missing level
    /// becomes 0, and the reward uses the permissive lookup (unknown
    /// level, reward 0). The replacement is validated as one unit: if
    /// the reward total exceeds the budget pool the entire import is
    /// rejected and the existing roster is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::BudgetExceeded`] if the rows' reward
    /// total exceeds the pool, or [`LedgerError::ArithmeticOverflow`]
    /// if summation overflows.
    pub fn bulk_replace(&mut self, rows: &[RosterRow]) -> Result<(), LedgerError> {
        let mut incoming = Vec::with_capacity(rows.len());
        let mut total: i64 = 0;

        for row in rows {
            let level = row.level.unwrap_or(0);
            total = total
                .checked_add(self.table.reward_or_zero(level))
                .ok_or(LedgerError::ArithmeticOverflow)?;
            incoming.push(Participant {
                id: EmployeeId::from(row.id.as_str()),
                name: row.name.clone(),
                level,
            });
        }

        if total > self.max_budget {
            return Err(LedgerError::BudgetExceeded {
                total,
                max: self.max_budget,
            });
        }

        let remaining = self
            .max_budget
            .checked_sub(total)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.participants = incoming;
        self.remaining_budget = remaining;

        tracing::debug!(
            count = self.participants.len(),
            total,
            remaining = self.remaining_budget,
            "Replaced roster from import"
        );
        Ok(())
    }

    /// Clear the roster and restore the full budget pool.
    ///
    /// Always succeeds. Clearing any persisted snapshot is the
    /// caller's responsibility.
    pub fn reset(&mut self) {
        self.participants.clear();
        self.remaining_budget = self.max_budget;
        tracing::debug!(remaining = self.remaining_budget, "Ledger reset");
    }

    /// Cross-check the explicit budget counter against the reward sum.
    ///
    /// The invariant holds by construction; this check exists as
    /// defense-in-depth and for tests.
    pub fn verify_budget(&self) -> BudgetCheck {
        verify_budget(
            &self.table,
            self.max_budget,
            self.remaining_budget,
            &self.participants,
        )
    }
}
