//! Event envelope and payloads.
//!
//! Events are the only thing that mutates state: command handlers validate
//! and emit them, appliers fold them into [`LedgerState`](super::LedgerState).
//! Every payload carries enough data to replay deterministically, so appliers
//! never read the clock or generate ids.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::order::{Order, OrderItem, PaymentInfo};
use crate::models::Table;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub event_id: Uuid,
    /// Global, strictly increasing across all entities.
    pub sequence: u64,
    pub timestamp: i64,
    /// Command that produced this event.
    pub command_id: Uuid,
    pub payload: EventPayload,
}

impl LedgerEvent {
    pub fn new(sequence: u64, timestamp: i64, command_id: Uuid, payload: EventPayload) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            sequence,
            timestamp,
            command_id,
            payload,
        }
    }

    pub fn event_type(&self) -> LedgerEventType {
        self.payload.event_type()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerEventType {
    TableAdded,
    TableUpdated,
    TableRemoved,
    TableStatusToggled,
    TableReserved,
    TableUnreserved,
    TablesMerged,
    TablesUnmerged,
    OrdersConsolidated,
    OrderOpened,
    ItemsAdded,
    ItemRemoved,
    ItemQuantityUpdated,
    DiscountApplied,
    OrderCustomerSet,
    OrderSaved,
    OrderTableChanged,
    OrderCancelled,
    OrderCompleted,
    PaymentSettled,
    CustomerVisited,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    TableAdded {
        table: Table,
    },
    TableUpdated {
        table_id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        seats: Option<i32>,
        #[serde(default)]
        description: Option<String>,
    },
    TableRemoved {
        table_id: String,
    },
    TableStatusToggled {
        table_id: String,
        /// The new value after toggling.
        is_active: bool,
    },
    TableReserved {
        table_id: String,
        #[serde(default)]
        reserved_by: Option<String>,
        #[serde(default)]
        reserved_until: Option<i64>,
        #[serde(default)]
        reserved_note: Option<String>,
        reserved_at: i64,
    },
    TableUnreserved {
        table_id: String,
    },
    TablesMerged {
        /// Full virtual table record, members and seat total included.
        merged_table: Table,
        member_ids: Vec<String>,
    },
    TablesUnmerged {
        merged_table_id: String,
        member_ids: Vec<String>,
    },
    /// Ongoing orders of merge members folded into one surviving order.
    OrdersConsolidated {
        surviving_order_id: String,
        merged_table_id: String,
        member_table_ids: Vec<String>,
        absorbed_order_ids: Vec<String>,
        /// Combined line items after fold.
        items: Vec<OrderItem>,
        #[serde(default)]
        saved_quantities: HashMap<String, i32>,
    },
    OrderOpened {
        order: Order,
    },
    ItemsAdded {
        order_id: String,
        items: Vec<OrderItem>,
    },
    ItemRemoved {
        order_id: String,
        menu_item_id: String,
        item_name: String,
    },
    ItemQuantityUpdated {
        order_id: String,
        menu_item_id: String,
        quantity: i32,
    },
    DiscountApplied {
        order_id: String,
        discount_percentage: f64,
    },
    OrderCustomerSet {
        order_id: String,
        #[serde(default)]
        customer_name: Option<String>,
        #[serde(default)]
        customer_phone: Option<String>,
    },
    OrderSaved {
        order_id: String,
        /// Quantities at the moment of saving.
        saved_quantities: HashMap<String, i32>,
    },
    OrderTableChanged {
        order_id: String,
        source_table_id: String,
        new_table_id: String,
    },
    OrderCancelled {
        order_id: String,
    },
    OrderCompleted {
        order_id: String,
        final_total: f64,
    },
    PaymentSettled {
        order_id: String,
        payment: PaymentInfo,
    },
    CustomerVisited {
        customer_id: String,
        name: String,
        #[serde(default)]
        phone: Option<String>,
        /// Amount added to the customer's outstanding credit (0 for
        /// fully-tendered settlements).
        credit_delta: f64,
        visited_at: i64,
    },
}

impl EventPayload {
    pub fn event_type(&self) -> LedgerEventType {
        match self {
            EventPayload::TableAdded { .. } => LedgerEventType::TableAdded,
            EventPayload::TableUpdated { .. } => LedgerEventType::TableUpdated,
            EventPayload::TableRemoved { .. } => LedgerEventType::TableRemoved,
            EventPayload::TableStatusToggled { .. } => LedgerEventType::TableStatusToggled,
            EventPayload::TableReserved { .. } => LedgerEventType::TableReserved,
            EventPayload::TableUnreserved { .. } => LedgerEventType::TableUnreserved,
            EventPayload::TablesMerged { .. } => LedgerEventType::TablesMerged,
            EventPayload::TablesUnmerged { .. } => LedgerEventType::TablesUnmerged,
            EventPayload::OrdersConsolidated { .. } => LedgerEventType::OrdersConsolidated,
            EventPayload::OrderOpened { .. } => LedgerEventType::OrderOpened,
            EventPayload::ItemsAdded { .. } => LedgerEventType::ItemsAdded,
            EventPayload::ItemRemoved { .. } => LedgerEventType::ItemRemoved,
            EventPayload::ItemQuantityUpdated { .. } => LedgerEventType::ItemQuantityUpdated,
            EventPayload::DiscountApplied { .. } => LedgerEventType::DiscountApplied,
            EventPayload::OrderCustomerSet { .. } => LedgerEventType::OrderCustomerSet,
            EventPayload::OrderSaved { .. } => LedgerEventType::OrderSaved,
            EventPayload::OrderTableChanged { .. } => LedgerEventType::OrderTableChanged,
            EventPayload::OrderCancelled { .. } => LedgerEventType::OrderCancelled,
            EventPayload::OrderCompleted { .. } => LedgerEventType::OrderCompleted,
            EventPayload::PaymentSettled { .. } => LedgerEventType::PaymentSettled,
            EventPayload::CustomerVisited { .. } => LedgerEventType::CustomerVisited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_payload_tagging() {
        let payload = EventPayload::OrderCancelled {
            order_id: "o1".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "ORDER_CANCELLED");
        assert_eq!(json["order_id"], "o1");
    }

    #[test]
    fn test_event_type_matches_payload() {
        let payload = EventPayload::TableRemoved {
            table_id: "t1".into(),
        };
        assert_eq!(payload.event_type(), LedgerEventType::TableRemoved);
    }
}
