//! OpenOrder command handler.
//!
//! A table holds at most one ongoing order; occupancy is enforced here, not
//! left to callers. Opening on a merged virtual table is allowed, and the
//! resulting order carries the merge membership.

use crate::ledger::money;
use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::util::resource_id;
use shared::{fold_items, EventPayload, LedgerEvent, Order, OrderItem};

#[derive(Debug, Clone)]
pub struct OpenOrderAction {
    pub table_id: String,
    pub items: Vec<OrderItem>,
}

impl CommandHandler for OpenOrderAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let table = ctx.table(&self.table_id)?;

        if !table.is_active {
            return Err(LedgerError::TableInactive(self.table_id.clone()));
        }
        if table.is_reserved_at(metadata.timestamp) {
            return Err(LedgerError::TableReserved(self.table_id.clone()));
        }
        if let Some(existing) = ctx.state().ongoing_order_for_table(&self.table_id) {
            return Err(LedgerError::TableOccupied(format!(
                "{} (order: {})",
                self.table_id, existing.id
            )));
        }

        for item in &self.items {
            money::validate_order_item(item)?;
        }

        let mut order = Order::new(
            resource_id("order"),
            self.table_id.clone(),
            metadata.timestamp,
        );
        order.items = fold_items(self.items.clone());
        order.is_merged_order = table.is_merged;
        order.merged_table_ids = table.merged_tables.clone();

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::OrderOpened { order },
        )])
    }
}
