//! ItemQuantityUpdated event applier.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct ItemQuantityUpdatedApplier;

impl EventApplier for ItemQuantityUpdatedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::ItemQuantityUpdated {
            order_id,
            menu_item_id,
            quantity,
        } = &event.payload
            && let Some(order) = state.orders.get_mut(order_id)
            && let Some(item) = order
                .items
                .iter_mut()
                .find(|i| &i.menu_item_id == menu_item_id)
        {
            item.quantity = *quantity;
        }
    }
}
