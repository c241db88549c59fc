//! Core traits of the command pipeline.
//!
//! Commands are validated and turned into events by [`CommandHandler`]
//! implementations (one per command); events are folded into state by
//! [`EventApplier`] implementations (one per event). Appliers are PURE:
//! they touch nothing outside the state tree and read only the event.

use enum_dispatch::enum_dispatch;
use thiserror::Error;
use uuid::Uuid;

#[allow(unused_imports)]
use crate::ledger::appliers::{
    CustomerVisitedApplier, DiscountAppliedApplier, EventAction, ItemQuantityUpdatedApplier,
    ItemRemovedApplier, ItemsAddedApplier, OrderCancelledApplier, OrderCompletedApplier,
    OrderCustomerSetApplier, OrderOpenedApplier, OrderSavedApplier, OrderTableChangedApplier,
    OrdersConsolidatedApplier, PaymentSettledApplier, TableAddedApplier, TableRemovedApplier,
    TableReservedApplier, TableStatusToggledApplier, TableUnreservedApplier, TableUpdatedApplier,
    TablesMergedApplier, TablesUnmergedApplier,
};

use shared::models::Table;
use shared::{CommandError, CommandErrorCode, LedgerEvent, LedgerState, Order, OrderStatus};

/// Domain errors raised during command validation.
///
/// Every variant maps to a [`CommandErrorCode`] on the declined response;
/// none of them escapes the engine as a panic.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Table is already occupied: {0}")]
    TableOccupied(String),

    #[error("Table is reserved: {0}")]
    TableReserved(String),

    #[error("Table is inactive: {0}")]
    TableInactive(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order already completed: {0}")]
    OrderAlreadyCompleted(String),

    #[error("Order already cancelled: {0}")]
    OrderAlreadyCancelled(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Customer required: {0}")]
    CustomerRequired(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<LedgerError> for CommandError {
    fn from(err: LedgerError) -> Self {
        let code = match &err {
            LedgerError::TableNotFound(_) => CommandErrorCode::TableNotFound,
            LedgerError::TableOccupied(_) => CommandErrorCode::TableOccupied,
            LedgerError::TableReserved(_) => CommandErrorCode::TableReserved,
            LedgerError::TableInactive(_) => CommandErrorCode::TableInactive,
            LedgerError::OrderNotFound(_) => CommandErrorCode::OrderNotFound,
            LedgerError::OrderAlreadyCompleted(_) => CommandErrorCode::OrderAlreadyCompleted,
            LedgerError::OrderAlreadyCancelled(_) => CommandErrorCode::OrderAlreadyCancelled,
            LedgerError::ItemNotFound(_) => CommandErrorCode::ItemNotFound,
            LedgerError::InvalidAmount(_) => CommandErrorCode::InvalidAmount,
            LedgerError::InvalidOperation(_) => CommandErrorCode::InvalidOperation,
            LedgerError::CustomerRequired(_) => CommandErrorCode::CustomerRequired,
            LedgerError::Storage(_) => CommandErrorCode::InternalError,
        };
        CommandError::new(code, err.to_string())
    }
}

/// Per-command metadata passed to handlers.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub command_id: Uuid,
    pub timestamp: i64,
}

/// Read view handed to command handlers during validation.
///
/// Handlers see the state as of the previous command and allocate sequence
/// numbers from here; they never mutate the state themselves.
pub struct CommandContext<'a> {
    state: &'a LedgerState,
    sequence: u64,
}

impl<'a> CommandContext<'a> {
    pub fn new(state: &'a LedgerState, current_sequence: u64) -> Self {
        Self {
            state,
            sequence: current_sequence,
        }
    }

    /// The state as of the previous command. The returned reference borrows
    /// the underlying state, not the context, so it stays usable across
    /// sequence allocation.
    pub fn state(&self) -> &'a LedgerState {
        self.state
    }

    /// Look up a table, erroring if it does not exist.
    pub fn table(&self, table_id: &str) -> Result<&'a Table, LedgerError> {
        self.state
            .tables
            .get(table_id)
            .ok_or_else(|| LedgerError::TableNotFound(table_id.to_string()))
    }

    /// Look up an order, erroring if it does not exist.
    pub fn order(&self, order_id: &str) -> Result<&'a Order, LedgerError> {
        self.state
            .orders
            .get(order_id)
            .ok_or_else(|| LedgerError::OrderNotFound(order_id.to_string()))
    }

    /// Look up an order and require it to still be ongoing.
    pub fn ongoing_order(&self, order_id: &str) -> Result<&'a Order, LedgerError> {
        let order = self.order(order_id)?;
        match order.status {
            OrderStatus::Ongoing => Ok(order),
            OrderStatus::Completed => {
                Err(LedgerError::OrderAlreadyCompleted(order_id.to_string()))
            }
            OrderStatus::Cancelled => {
                Err(LedgerError::OrderAlreadyCancelled(order_id.to_string()))
            }
        }
    }

    /// Allocate the next global sequence number.
    pub fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    /// Highest sequence allocated so far.
    pub fn current_sequence(&self) -> u64 {
        self.sequence
    }
}

/// Validates one command against current state and emits events.
pub trait CommandHandler {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError>;
}

/// Folds one event into the state tree. Must be deterministic.
#[enum_dispatch]
pub trait EventApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent);
}


#[cfg(test)]
mod tests {
    use super::*;
    use shared::CommandErrorCode;

    #[test]
    fn test_error_maps_to_code() {
        let err: CommandError = LedgerError::TableOccupied("t1".into()).into();
        assert_eq!(err.code, CommandErrorCode::TableOccupied);
        assert!(err.message.contains("t1"));
    }

    #[test]
    fn test_context_sequence_allocation() {
        let state = LedgerState::default();
        let mut ctx = CommandContext::new(&state, 41);
        assert_eq!(ctx.next_sequence(), 42);
        assert_eq!(ctx.next_sequence(), 43);
        assert_eq!(ctx.current_sequence(), 43);
    }

    #[test]
    fn test_context_missing_lookups() {
        let state = LedgerState::default();
        let ctx = CommandContext::new(&state, 0);
        assert!(matches!(ctx.table("nope"), Err(LedgerError::TableNotFound(_))));
        assert!(matches!(ctx.order("nope"), Err(LedgerError::OrderNotFound(_))));
    }
}
