//! DiscountApplied event applier.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct DiscountAppliedApplier;

impl EventApplier for DiscountAppliedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::DiscountApplied {
            order_id,
            discount_percentage,
        } = &event.payload
            && let Some(order) = state.orders.get_mut(order_id)
        {
            order.discount_percentage = *discount_percentage;
        }
    }
}
