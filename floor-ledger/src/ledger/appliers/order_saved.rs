//! OrderSaved event applier.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct OrderSavedApplier;

impl EventApplier for OrderSavedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::OrderSaved {
            order_id,
            saved_quantities,
        } = &event.payload
            && let Some(order) = state.orders.get_mut(order_id)
        {
            order.is_saved = true;
            order.saved_quantities = saved_quantities.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Order;
    use uuid::Uuid;

    #[test]
    fn test_saved_quantities_are_replaced_not_merged() {
        let mut state = LedgerState::default();
        let mut order = Order::new("o1".into(), "t1".into(), 0);
        order.saved_quantities.insert("old".into(), 9);
        state.orders.insert(order.id.clone(), order);

        let event = LedgerEvent::new(
            1,
            0,
            Uuid::new_v4(),
            EventPayload::OrderSaved {
                order_id: "o1".into(),
                saved_quantities: [("momo".to_string(), 2)].into(),
            },
        );
        OrderSavedApplier.apply(&mut state, &event);

        let order = &state.orders["o1"];
        assert!(order.is_saved);
        assert_eq!(order.saved_quantities.len(), 1);
        assert_eq!(order.saved_quantities.get("momo"), Some(&2));
    }
}
