//! ItemsAdded event applier.

use crate::ledger::traits::EventApplier;
use shared::{merge_item_into, EventPayload, LedgerEvent, LedgerState};

pub struct ItemsAddedApplier;

impl EventApplier for ItemsAddedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::ItemsAdded { order_id, items } = &event.payload
            && let Some(order) = state.orders.get_mut(order_id)
        {
            for item in items {
                merge_item_into(&mut order.items, item.clone());
            }
        }
    }
}
