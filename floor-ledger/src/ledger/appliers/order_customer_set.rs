//! OrderCustomerSet event applier.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct OrderCustomerSetApplier;

impl EventApplier for OrderCustomerSetApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::OrderCustomerSet {
            order_id,
            customer_name,
            customer_phone,
        } = &event.payload
            && let Some(order) = state.orders.get_mut(order_id)
        {
            order.customer_name = customer_name.clone();
            order.customer_phone = customer_phone.clone();
        }
    }
}
