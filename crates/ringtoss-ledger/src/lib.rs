//! Reward ledger and budget reconciliation for the Ringtoss prize game.
//!
//! Every participant in the event sits at a discrete level, every level
//! maps to a fixed reward, and every reward is debited from one shared
//! budget pool. The pool must never go negative, so every mutation is
//! validated in full before any state changes.
//!
//! # Architecture
//!
//! The ledger crate provides three modules:
//!
//! - [`rewards`] -- The [`RewardTable`]: the fixed level-to-reward mapping.
//! - [`ledger`] -- The [`Ledger`] struct: participants, budget, and all
//!   mutating operations.
//! - [`reconcile`] -- The budget reconciliation check that cross-verifies
//!   the explicit budget counter against the derivable reward sum.
//!
//! # Budget invariant
//!
//! After every successful operation:
//!
//! ```text
//! remaining_budget >= 0
//! remaining_budget == max_budget - sum(reward of each participant)
//! ```
//!
//! Both halves are enforced by construction (check-then-commit, all or
//! nothing) and re-verifiable at any time via [`Ledger::verify_budget`].
//!
//! # Two-phase level changes
//!
//! Lowering a participant's level needs operator confirmation, but the
//! confirmation policy belongs to the caller, not the core. A level
//! change is therefore split into [`Ledger::plan_level_change`] (pure,
//! reports whether the change is a downgrade and what the budget would
//! become) and [`Ledger::commit_level_change`] (re-validates and applies
//! atomically). The core never blocks on a prompt.
//!
//! # Usage
//!
//! ```
//! # fn main() -> Result<(), ringtoss_ledger::LedgerError> {
//! use ringtoss_ledger::{Ledger, RewardTable};
//!
//! let table = RewardTable::new(vec![0, 100, 300, 500])?;
//! let mut ledger = Ledger::new(table, 6000)?;
//!
//! // Add a participant at level 0 (costs nothing).
//! ledger.add_participant("Mei", "001");
//!
//! // Raise them to level 3: plan, then commit.
//! let plan = ledger.plan_level_change(0, 3)?;
//! assert!(!plan.is_downgrade());
//! ledger.commit_level_change(&plan)?;
//!
//! assert_eq!(ledger.remaining_budget(), 5500);
//! # Ok(())
//! # }
//! ```

pub mod ledger;
pub mod reconcile;
pub mod rewards;

// Re-export primary types at crate root.
pub use ledger::{Ledger, LevelChange};
pub use reconcile::{BudgetAnomaly, BudgetCheck};
pub use rewards::RewardTable;

/// Errors that can occur in ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The requested level is not an index into the reward table.
    #[error("level {level} is out of range (max level is {max})")]
    InvalidLevel {
        /// The rejected level.
        level: u32,
        /// The highest valid level.
        max: u32,
    },

    /// The positional index does not reference an existing participant.
    #[error("no participant at index {index} (roster has {len})")]
    NoSuchParticipant {
        /// The rejected index.
        index: usize,
        /// The current roster length.
        len: usize,
    },

    /// The level change would drive the shared budget below zero.
    #[error("insufficient budget: need {shortfall} more than the {remaining} remaining")]
    InsufficientBudget {
        /// How far below zero the budget would have gone.
        shortfall: i64,
        /// The untouched remaining budget.
        remaining: i64,
    },

    /// An imported roster's reward total exceeds the budget pool.
    #[error("roster rewards total {total} exceeds the budget of {max}")]
    BudgetExceeded {
        /// The reward total of the rejected roster.
        total: i64,
        /// The configured budget pool.
        max: i64,
    },

    /// A planned level change no longer matches the ledger state.
    #[error("stale plan: participant {index} changed since the plan was made")]
    StalePlan {
        /// The participant the plan targeted.
        index: usize,
    },

    /// A reward table must have at least one level.
    #[error("reward table must not be empty")]
    EmptyRewardTable,

    /// Level 0 must cost nothing: adding a participant never touches
    /// the budget.
    #[error("level 0 reward must be zero, got {reward}")]
    NonZeroBaseReward {
        /// The offending level-0 reward.
        reward: i64,
    },

    /// Rewards are debits from the pool and cannot be negative.
    #[error("reward for level {level} must not be negative, got {reward}")]
    NegativeReward {
        /// The offending level.
        level: usize,
        /// The offending reward.
        reward: i64,
    },

    /// The configured budget pool cannot be negative.
    #[error("budget pool must not be negative, got {max_budget}")]
    NegativeBudget {
        /// The offending configured budget.
        max_budget: i64,
    },

    /// Budget arithmetic overflowed `i64`.
    #[error("budget arithmetic overflowed")]
    ArithmeticOverflow,
}
