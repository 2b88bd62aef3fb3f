//! Shared type definitions for the Ringtoss prize-game ledger.
//!
//! This crate is the single source of truth for the types exchanged
//! between the ledger core, the persistence gateway, and the roster
//! codec.
//!
//! # Modules
//!
//! - [`ids`] -- The opaque [`EmployeeId`] identifier wrapper
//! - [`records`] -- Participant and snapshot record types

pub mod ids;
pub mod records;

// Re-export all public types at crate root for convenience.
pub use ids::EmployeeId;
pub use records::{LedgerSnapshot, Participant, ParticipantRecord, RosterRow};
