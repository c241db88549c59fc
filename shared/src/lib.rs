//! Shared types for the floor & order ledger
//!
//! Pure data types used by the ledger engine and its consumers:
//! floor models (tables, customers), the order/command/event types of the
//! command-processing pipeline, and small utilities.

pub mod ledger;
pub mod models;
pub mod util;

pub use serde::{Deserialize, Serialize};

// Re-exports for convenient access
pub use ledger::{
    fold_items, merge_item_into, CommandError, CommandErrorCode, CommandResponse, EventPayload,
    LedgerCommand, LedgerCommandPayload, LedgerEvent, LedgerEventType, LedgerState, Order,
    OrderItem, OrderStatus, PaymentInfo, PaymentMethod, SplitPortion, TicketType,
};
pub use models::{Customer, Table};
