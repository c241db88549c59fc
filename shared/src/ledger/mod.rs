//! Core ledger types shared between the engine and its clients.

pub mod command;
pub mod event;
pub mod order;
pub mod state;
pub mod types;

pub use command::{LedgerCommand, LedgerCommandPayload};
pub use event::{EventPayload, LedgerEvent, LedgerEventType};
pub use order::{
    fold_items, merge_item_into, Order, OrderItem, OrderStatus, PaymentInfo, PaymentMethod,
    SplitPortion, TicketType,
};
pub use state::LedgerState;
pub use types::{CommandError, CommandErrorCode, CommandResponse};
