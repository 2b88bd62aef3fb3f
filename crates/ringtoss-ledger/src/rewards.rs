//! The fixed level-to-reward mapping.
//!
//! A [`RewardTable`] is built once from configuration and never changes
//! for the lifetime of a ledger. Levels are indices `0..=max_level`;
//! each maps to a non-negative reward amount, and level 0 always maps
//! to zero so that adding a fresh participant never touches the budget.

use crate::LedgerError;

/// Immutable, ordered mapping from level to reward amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardTable {
    /// Reward per level, indexed by level.
    rewards: Vec<i64>,
}

impl RewardTable {
    /// Build a reward table from the per-level amounts.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmptyRewardTable`] for an empty table,
    /// [`LedgerError::NonZeroBaseReward`] if level 0 costs anything,
    /// and [`LedgerError::NegativeReward`] for any negative amount.
    pub fn new(rewards: Vec<i64>) -> Result<Self, LedgerError> {
        let Some(&base) = rewards.first() else {
            return Err(LedgerError::EmptyRewardTable);
        };
        if base != 0 {
            return Err(LedgerError::NonZeroBaseReward { reward: base });
        }
        if let Some((level, &reward)) = rewards.iter().enumerate().find(|&(_, &r)| r < 0) {
            return Err(LedgerError::NegativeReward { level, reward });
        }
        Ok(Self { rewards })
    }

    /// The highest valid level (the table has `max_level() + 1` entries).
    pub fn max_level(&self) -> u32 {
        // Length is at least 1 and a table from config is far below
        // u32::MAX entries; saturate rather than panic regardless.
        u32::try_from(self.rewards.len().saturating_sub(1)).unwrap_or(u32::MAX)
    }

    /// Look up the reward for a level.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidLevel`] if `level` is not an index
    /// into the table.
    pub fn reward_for(&self, level: u32) -> Result<i64, LedgerError> {
        usize::try_from(level)
            .ok()
            .and_then(|idx| self.rewards.get(idx))
            .copied()
            .ok_or(LedgerError::InvalidLevel {
                level,
                max: self.max_level(),
            })
    }

    /// Permissive lookup used by the roster-import path: a level outside
    /// the table yields reward 0 instead of an error.
    ///
    /// This preserves the import policy of accepting whatever a partial
    /// or hand-edited roster file says and rewarding unknown levels with
    /// nothing.
    pub fn reward_or_zero(&self, level: u32) -> i64 {
        self.reward_for(level).unwrap_or(0)
    }
}
