//! Command envelope and payloads.
//!
//! Every mutation enters the engine as a [`LedgerCommand`]. The `command_id`
//! gives each submission an identity: replaying an already-processed command
//! is acknowledged without re-executing it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::order::{OrderItem, PaymentMethod, SplitPortion};
use crate::util::now_millis;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerCommand {
    pub command_id: Uuid,
    pub timestamp: i64,
    pub payload: LedgerCommandPayload,
}

impl LedgerCommand {
    pub fn new(payload: LedgerCommandPayload) -> Self {
        Self {
            command_id: Uuid::new_v4(),
            timestamp: now_millis(),
            payload,
        }
    }
}

fn default_seats() -> Option<i32> {
    Some(4)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerCommandPayload {
    // === Table registry ===
    AddTable {
        name: String,
        #[serde(default = "default_seats")]
        seats: Option<i32>,
        #[serde(default)]
        description: Option<String>,
    },
    UpdateTable {
        table_id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        seats: Option<i32>,
        #[serde(default)]
        description: Option<String>,
    },
    RemoveTable {
        table_id: String,
    },
    ToggleTableStatus {
        table_id: String,
    },
    ReserveTable {
        table_id: String,
        #[serde(default)]
        reserved_by: Option<String>,
        #[serde(default)]
        reserved_until: Option<i64>,
        #[serde(default)]
        reserved_note: Option<String>,
    },
    UnreserveTable {
        table_id: String,
    },

    // === Order ledger ===
    OpenOrder {
        table_id: String,
        items: Vec<OrderItem>,
    },
    AddItems {
        order_id: String,
        items: Vec<OrderItem>,
    },
    RemoveItem {
        order_id: String,
        menu_item_id: String,
    },
    UpdateItemQuantity {
        order_id: String,
        menu_item_id: String,
        quantity: i32,
    },
    ApplyDiscount {
        order_id: String,
        discount_percentage: f64,
    },
    SetOrderCustomer {
        order_id: String,
        #[serde(default)]
        customer_name: Option<String>,
        #[serde(default)]
        customer_phone: Option<String>,
    },
    MarkOrderSaved {
        order_id: String,
    },
    CancelOrder {
        order_id: String,
    },
    ChangeOrderTable {
        order_id: String,
        new_table_id: String,
    },

    // === Merge orchestrator ===
    MergeTables {
        table_ids: Vec<String>,
        merged_name: String,
        #[serde(default)]
        merged_table_id: Option<String>,
    },
    UnmergeTables {
        merged_table_id: String,
    },

    // === Payment reconciler ===
    SettlePayment {
        order_id: String,
        method: PaymentMethod,
        amount_paid: f64,
        #[serde(default)]
        customer_name: Option<String>,
        #[serde(default)]
        customer_phone: Option<String>,
    },
    SettleSplitPayment {
        order_id: String,
        splits: Vec<SplitPortion>,
        #[serde(default)]
        customer_name: Option<String>,
        #[serde(default)]
        customer_phone: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_table_defaults_seats() {
        let json = r#"{"type":"ADD_TABLE","name":"Patio 1"}"#;
        let payload: LedgerCommandPayload = serde_json::from_str(json).unwrap();
        match payload {
            LedgerCommandPayload::AddTable { name, seats, description } => {
                assert_eq!(name, "Patio 1");
                assert_eq!(seats, Some(4));
                assert!(description.is_none());
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_command_ids_are_unique() {
        let a = LedgerCommand::new(LedgerCommandPayload::UnreserveTable {
            table_id: "t1".into(),
        });
        let b = LedgerCommand::new(LedgerCommandPayload::UnreserveTable {
            table_id: "t1".into(),
        });
        assert_ne!(a.command_id, b.command_id);
    }
}
