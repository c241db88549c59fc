//! Floor & order ledger engine.
//!
//! Event-sourced state machine for a restaurant floor: table registry,
//! order ledger, table merging, and payment reconciliation with a customer
//! credit ledger. All mutation flows through [`ledger::FloorLedger`] as
//! commands; committed events are broadcast to subscribers.

pub mod ledger;

pub use ledger::{FloorLedger, LedgerError, LedgerStorage, ManagerError, StorageError};
pub use ledger::printing::{PrintOutcome, TicketJob, TicketPrinter};
