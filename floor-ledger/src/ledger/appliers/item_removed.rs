//! ItemRemoved event applier.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct ItemRemovedApplier;

impl EventApplier for ItemRemovedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::ItemRemoved {
            order_id,
            menu_item_id,
            ..
        } = &event.payload
            && let Some(order) = state.orders.get_mut(order_id)
        {
            order.items.retain(|i| &i.menu_item_id != menu_item_id);
        }
    }
}
