//! Event applier implementations.
//!
//! Each applier implements the `EventApplier` trait and folds one event
//! type into the state tree. Appliers are PURE: they read only the event
//! payload, so replaying the stream yields the identical state.

use enum_dispatch::enum_dispatch;

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

mod customer_visited;
mod discount_applied;
mod item_quantity_updated;
mod item_removed;
mod items_added;
mod order_cancelled;
mod order_completed;
mod order_customer_set;
mod order_opened;
mod order_saved;
mod order_table_changed;
mod orders_consolidated;
mod payment_settled;
mod table_added;
mod table_removed;
mod table_reserved;
mod table_status_toggled;
mod table_updated;
mod tables_merged;
mod tables_unmerged;

pub use customer_visited::CustomerVisitedApplier;
pub use discount_applied::DiscountAppliedApplier;
pub use item_quantity_updated::ItemQuantityUpdatedApplier;
pub use item_removed::ItemRemovedApplier;
pub use items_added::ItemsAddedApplier;
pub use order_cancelled::OrderCancelledApplier;
pub use order_completed::OrderCompletedApplier;
pub use order_customer_set::OrderCustomerSetApplier;
pub use order_opened::OrderOpenedApplier;
pub use order_saved::OrderSavedApplier;
pub use order_table_changed::OrderTableChangedApplier;
pub use orders_consolidated::OrdersConsolidatedApplier;
pub use payment_settled::PaymentSettledApplier;
pub use table_added::TableAddedApplier;
pub use table_removed::TableRemovedApplier;
pub use table_reserved::{TableReservedApplier, TableUnreservedApplier};
pub use table_status_toggled::TableStatusToggledApplier;
pub use table_updated::TableUpdatedApplier;
pub use tables_merged::TablesMergedApplier;
pub use tables_unmerged::TablesUnmergedApplier;

/// EventAction enum - dispatches to concrete applier implementations
///
/// Uses enum_dispatch for zero-cost static dispatch.
#[enum_dispatch(EventApplier)]
pub enum EventAction {
    TableAdded(TableAddedApplier),
    TableUpdated(TableUpdatedApplier),
    TableRemoved(TableRemovedApplier),
    TableStatusToggled(TableStatusToggledApplier),
    TableReserved(TableReservedApplier),
    TableUnreserved(TableUnreservedApplier),
    TablesMerged(TablesMergedApplier),
    TablesUnmerged(TablesUnmergedApplier),
    OrdersConsolidated(OrdersConsolidatedApplier),
    OrderOpened(OrderOpenedApplier),
    ItemsAdded(ItemsAddedApplier),
    ItemRemoved(ItemRemovedApplier),
    ItemQuantityUpdated(ItemQuantityUpdatedApplier),
    DiscountApplied(DiscountAppliedApplier),
    OrderCustomerSet(OrderCustomerSetApplier),
    OrderSaved(OrderSavedApplier),
    OrderTableChanged(OrderTableChangedApplier),
    OrderCancelled(OrderCancelledApplier),
    OrderCompleted(OrderCompletedApplier),
    PaymentSettled(PaymentSettledApplier),
    CustomerVisited(CustomerVisitedApplier),
}

/// Convert LedgerEvent reference to EventAction
///
/// This is the ONLY place with a match on EventPayload.
impl From<&LedgerEvent> for EventAction {
    fn from(event: &LedgerEvent) -> Self {
        match &event.payload {
            EventPayload::TableAdded { .. } => EventAction::TableAdded(TableAddedApplier),
            EventPayload::TableUpdated { .. } => EventAction::TableUpdated(TableUpdatedApplier),
            EventPayload::TableRemoved { .. } => EventAction::TableRemoved(TableRemovedApplier),
            EventPayload::TableStatusToggled { .. } => {
                EventAction::TableStatusToggled(TableStatusToggledApplier)
            }
            EventPayload::TableReserved { .. } => EventAction::TableReserved(TableReservedApplier),
            EventPayload::TableUnreserved { .. } => {
                EventAction::TableUnreserved(TableUnreservedApplier)
            }
            EventPayload::TablesMerged { .. } => EventAction::TablesMerged(TablesMergedApplier),
            EventPayload::TablesUnmerged { .. } => {
                EventAction::TablesUnmerged(TablesUnmergedApplier)
            }
            EventPayload::OrdersConsolidated { .. } => {
                EventAction::OrdersConsolidated(OrdersConsolidatedApplier)
            }
            EventPayload::OrderOpened { .. } => EventAction::OrderOpened(OrderOpenedApplier),
            EventPayload::ItemsAdded { .. } => EventAction::ItemsAdded(ItemsAddedApplier),
            EventPayload::ItemRemoved { .. } => EventAction::ItemRemoved(ItemRemovedApplier),
            EventPayload::ItemQuantityUpdated { .. } => {
                EventAction::ItemQuantityUpdated(ItemQuantityUpdatedApplier)
            }
            EventPayload::DiscountApplied { .. } => {
                EventAction::DiscountApplied(DiscountAppliedApplier)
            }
            EventPayload::OrderCustomerSet { .. } => {
                EventAction::OrderCustomerSet(OrderCustomerSetApplier)
            }
            EventPayload::OrderSaved { .. } => EventAction::OrderSaved(OrderSavedApplier),
            EventPayload::OrderTableChanged { .. } => {
                EventAction::OrderTableChanged(OrderTableChangedApplier)
            }
            EventPayload::OrderCancelled { .. } => {
                EventAction::OrderCancelled(OrderCancelledApplier)
            }
            EventPayload::OrderCompleted { .. } => {
                EventAction::OrderCompleted(OrderCompletedApplier)
            }
            EventPayload::PaymentSettled { .. } => {
                EventAction::PaymentSettled(PaymentSettledApplier)
            }
            EventPayload::CustomerVisited { .. } => {
                EventAction::CustomerVisited(CustomerVisitedApplier)
            }
        }
    }
}

/// Apply an event to the state via its applier.
pub fn apply_event(state: &mut LedgerState, event: &LedgerEvent) {
    let applier: EventAction = event.into();
    applier.apply(state, event);
}
