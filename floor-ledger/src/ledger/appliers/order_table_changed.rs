//! OrderTableChanged event applier.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct OrderTableChangedApplier;

impl EventApplier for OrderTableChangedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        let EventPayload::OrderTableChanged {
            order_id,
            new_table_id,
            ..
        } = &event.payload
        else {
            return;
        };

        let merge_info = state
            .tables
            .get(new_table_id)
            .map(|t| (t.is_merged, t.merged_tables.clone()));
        if let Some(order) = state.orders.get_mut(order_id) {
            order.table_id = new_table_id.clone();
            let (is_merged, merged_tables) = merge_info.unwrap_or((false, vec![]));
            order.is_merged_order = is_merged;
            order.merged_table_ids = merged_tables;
        }
    }
}
