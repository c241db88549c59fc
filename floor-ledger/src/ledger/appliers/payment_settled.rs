//! PaymentSettled event applier.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct PaymentSettledApplier;

impl EventApplier for PaymentSettledApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::PaymentSettled { order_id, payment } = &event.payload
            && let Some(order) = state.orders.get_mut(order_id)
        {
            order.payment = Some(payment.clone());
        }
    }
}
