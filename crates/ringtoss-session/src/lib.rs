//! Operator session wiring for the Ringtoss prize-game ledger.
//!
//! This crate is the seam between the ledger core and an embedding UI:
//! it loads configuration, initializes logging, seeds the ledger from
//! the stored snapshot, persists after every successful mutation, and
//! owns the downgrade-confirmation and warn-on-persistence-failure
//! policies.
//!
//! # Startup sequence
//!
//! 1. [`logging::init`] with the configured default filter
//! 2. [`config::EventConfig::from_file`] (absent file: use defaults)
//! 3. [`session::Session::open`] with a snapshot store
//! 4. Drive [`session::Session`] operations from UI events
//!
//! ```
//! # fn main() -> Result<(), ringtoss_session::SessionError> {
//! use ringtoss_session::{Confirmation, EventConfig, Session};
//! use ringtoss_store::MemoryStore;
//!
//! let config = EventConfig::default();
//! let mut session = Session::open(&config, MemoryStore::new())?;
//!
//! session.add_participant("Mei", "001");
//! session.set_level(0, 3, Confirmation::Declined)?; // upgrade: no prompt needed
//! assert_eq!(session.ledger().remaining_budget(), 5500);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod session;

// Re-export primary types at crate root.
pub use config::{ConfigError, EventConfig};
pub use error::SessionError;
pub use session::{Confirmation, Session};
