//! OrderCancelled event applier.
//!
//! Cancelled orders leave the ledger entirely; the event stream is the
//! audit trail.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct OrderCancelledApplier;

impl EventApplier for OrderCancelledApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::OrderCancelled { order_id } = &event.payload {
            state.orders.remove(order_id);
            state.ongoing_ids.retain(|id| id != order_id);
            state.completed_ids.retain(|id| id != order_id);
        }
    }
}
