//! Ledger engine: command pipeline, storage, and read-side helpers.
//!
//! # Architecture
//!
//! ```text
//! LedgerCommand --> CommandAction (validate, emit events)
//!                        |
//!                        v
//!                  LedgerEvent(s) --> EventAction (pure appliers)
//!                        |                  |
//!                        v                  v
//!                  redb (events +     LedgerState (whole-floor tree)
//!                  state + idempotency)
//!                        |
//!                        v
//!                  broadcast to subscribers
//! ```
//!
//! A single writer processes commands one at a time; each command's events
//! and resulting state are committed in one redb transaction, so compound
//! operations (merges, settlements) are all-or-nothing.

pub mod actions;
pub mod appliers;
pub mod customers;
pub mod manager;
pub mod money;
pub mod printing;
pub mod selectors;
pub mod storage;
pub mod traits;

pub use manager::{FloorLedger, ManagerError, ManagerResult};
pub use storage::{LedgerStorage, StorageError};
pub use traits::{CommandContext, CommandHandler, CommandMetadata, EventApplier, LedgerError};
