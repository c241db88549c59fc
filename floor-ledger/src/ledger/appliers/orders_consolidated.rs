//! OrdersConsolidated event applier.
//!
//! Moves the surviving order onto the merged table with the pre-combined
//! items from the event, and drops the absorbed orders entirely. The
//! survivor keeps its id, created_at, discount, and customer details.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct OrdersConsolidatedApplier;

impl EventApplier for OrdersConsolidatedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        let EventPayload::OrdersConsolidated {
            surviving_order_id,
            merged_table_id,
            member_table_ids,
            absorbed_order_ids,
            items,
            saved_quantities,
        } = &event.payload
        else {
            return;
        };

        if let Some(order) = state.orders.get_mut(surviving_order_id) {
            order.table_id = merged_table_id.clone();
            order.is_merged_order = true;
            order.merged_table_ids = member_table_ids.clone();
            order.items = items.clone();
            order.saved_quantities = saved_quantities.clone();
            order.is_saved = order.is_saved || !saved_quantities.is_empty();
        }
        for id in absorbed_order_ids {
            state.orders.remove(id);
            state.ongoing_ids.retain(|oid| oid != id);
        }
    }
}
