//! OrderOpened event applier.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct OrderOpenedApplier;

impl EventApplier for OrderOpenedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::OrderOpened { order } = &event.payload {
            // Most recent first.
            state.ongoing_ids.insert(0, order.id.clone());
            state.orders.insert(order.id.clone(), order.clone());
        }
    }
}
