//! Read-side helpers over [`LedgerState`].
//!
//! Pure functions; the manager exposes them as query methods. Reservation
//! expiry is derived here at read time, so an expired reservation vanishes
//! from these views without any command having run.

use shared::models::Table;
use shared::{LedgerState, Order, OrderItem, OrderStatus};

/// All tables in display order.
pub fn all_tables(state: &LedgerState) -> Vec<&Table> {
    state
        .table_order
        .iter()
        .filter_map(|id| state.tables.get(id))
        .collect()
}

/// Tables currently active (merge members and disabled tables excluded).
pub fn active_tables(state: &LedgerState) -> Vec<&Table> {
    all_tables(state).into_iter().filter(|t| t.is_active).collect()
}

/// Tables that can take a booking at `now`.
pub fn bookable_tables(state: &LedgerState, now: i64) -> Vec<&Table> {
    all_tables(state)
        .into_iter()
        .filter(|t| t.is_bookable(now))
        .collect()
}

/// Merged virtual tables.
pub fn merged_tables(state: &LedgerState) -> Vec<&Table> {
    all_tables(state).into_iter().filter(|t| t.is_merged).collect()
}

/// Ongoing orders, most recent first.
pub fn ongoing_orders(state: &LedgerState) -> Vec<&Order> {
    state
        .ongoing_ids
        .iter()
        .filter_map(|id| state.orders.get(id))
        .filter(|o| o.status == OrderStatus::Ongoing)
        .collect()
}

/// Completed orders, most recent first.
pub fn completed_orders(state: &LedgerState) -> Vec<&Order> {
    state
        .completed_ids
        .iter()
        .filter_map(|id| state.orders.get(id))
        .filter(|o| o.status == OrderStatus::Completed)
        .collect()
}

/// Line items not yet sent to the kitchen: current quantity minus the
/// quantity as of the last save. Items with no net addition are excluded.
pub fn print_delta(order: &Order) -> Vec<OrderItem> {
    order
        .items
        .iter()
        .filter_map(|item| {
            let saved = order
                .saved_quantities
                .get(&item.menu_item_id)
                .copied()
                .unwrap_or(0);
            let delta = item.quantity - saved;
            if delta > 0 {
                let mut out = item.clone();
                out.quantity = delta;
                Some(out)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::TicketType;

    fn table(id: &str) -> Table {
        Table::new(id.to_string(), id.to_uppercase(), 4, None, 0)
    }

    fn state_with_tables(tables: Vec<Table>) -> LedgerState {
        let mut state = LedgerState::default();
        for t in tables {
            state.table_order.push(t.id.clone());
            state.tables.insert(t.id.clone(), t);
        }
        state
    }

    fn item(id: &str, qty: i32) -> OrderItem {
        OrderItem {
            menu_item_id: id.to_string(),
            name: id.to_string(),
            price: 5.0,
            quantity: qty,
            modifiers: vec![],
            ticket_type: TicketType::Kot,
        }
    }

    #[test]
    fn test_all_tables_preserves_display_order() {
        let state = state_with_tables(vec![table("b"), table("a"), table("c")]);
        let ids: Vec<&str> = all_tables(&state).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_expired_reservation_is_bookable() {
        let mut t = table("t1");
        t.is_reserved = true;
        t.reserved_until = Some(1_000);
        let state = state_with_tables(vec![t]);

        assert!(bookable_tables(&state, 500).is_empty());
        assert_eq!(bookable_tables(&state, 2_000).len(), 1);
    }

    #[test]
    fn test_print_delta_unsaved_order_prints_everything() {
        let mut order = Order::new("o1".into(), "t1".into(), 0);
        order.items = vec![item("a", 2), item("b", 1)];

        let delta = print_delta(&order);
        assert_eq!(delta.len(), 2);
        assert_eq!(delta[0].quantity, 2);
    }

    #[test]
    fn test_print_delta_after_save_only_new_quantities() {
        let mut order = Order::new("o1".into(), "t1".into(), 0);
        order.items = vec![item("a", 3), item("b", 1)];
        order.saved_quantities.insert("a".into(), 2);
        order.saved_quantities.insert("b".into(), 1);

        let delta = print_delta(&order);
        assert_eq!(delta.len(), 1);
        assert_eq!(delta[0].menu_item_id, "a");
        assert_eq!(delta[0].quantity, 1);
    }

    #[test]
    fn test_print_delta_reduced_quantity_excluded() {
        let mut order = Order::new("o1".into(), "t1".into(), 0);
        order.items = vec![item("a", 1)];
        order.saved_quantities.insert("a".into(), 3);

        assert!(print_delta(&order).is_empty());
    }
}
