//! Error type for session operations.
//!
//! Wraps the errors of the layers the session coordinates. Persistence
//! failures deliberately do NOT appear here: per the fire-and-forget
//! policy they are logged as warnings and never fail an operation.

use ringtoss_ledger::LedgerError;
use ringtoss_roster::RosterError;

use crate::config::ConfigError;

/// Errors surfaced to the session's caller.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A ledger operation was rejected.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A roster file could not be decoded or encoded.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The operator declined the downgrade confirmation.
    ///
    /// A normal cancellation, not an alarm: the caller dismisses it
    /// without a user-visible notice.
    #[error("downgrade declined by the operator")]
    DowngradeDeclined,
}
