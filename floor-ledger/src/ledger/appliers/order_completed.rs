//! OrderCompleted event applier.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState, OrderStatus};

pub struct OrderCompletedApplier;

impl EventApplier for OrderCompletedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::OrderCompleted { order_id, .. } = &event.payload {
            if let Some(order) = state.orders.get_mut(order_id) {
                order.status = OrderStatus::Completed;
            }
            state.ongoing_ids.retain(|id| id != order_id);
            state.completed_ids.insert(0, order_id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Order;
    use uuid::Uuid;

    #[test]
    fn test_completion_moves_order_between_indices() {
        let mut state = LedgerState::default();
        let order = Order::new("o1".into(), "t1".into(), 0);
        state.ongoing_ids.push(order.id.clone());
        state.orders.insert(order.id.clone(), order);

        let event = LedgerEvent::new(
            1,
            0,
            Uuid::new_v4(),
            EventPayload::OrderCompleted {
                order_id: "o1".into(),
                final_total: 42.0,
            },
        );
        OrderCompletedApplier.apply(&mut state, &event);

        assert!(state.ongoing_ids.is_empty());
        assert_eq!(state.completed_ids, vec!["o1".to_string()]);
        assert_eq!(state.orders["o1"].status, OrderStatus::Completed);
    }
}
