//! Order data model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Ongoing,
    Completed,
    Cancelled,
}

/// Which kitchen station a line item prints to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketType {
    /// Kitchen order ticket.
    #[default]
    Kot,
    /// Bar order ticket.
    Bot,
}

/// A line item. Lines merge by `menu_item_id`, so an order never carries two
/// lines for the same menu item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub menu_item_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub ticket_type: TicketType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Bank,
    Fonepay,
    Credit,
    Split,
}

/// One portion of a split settlement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SplitPortion {
    pub method: PaymentMethod,
    pub amount: f64,
}

/// Final payment record attached to a completed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentInfo {
    pub method: PaymentMethod,
    /// Amount owed (order total after discount).
    pub amount: f64,
    /// Amount actually tendered; excludes any credit portion.
    pub amount_paid: f64,
    pub change: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub split_payments: Vec<SplitPortion>,
    /// Portion posted to the customer's credit ledger.
    #[serde(default)]
    pub credit_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub table_id: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    /// Percentage 0..=100 applied to the subtotal.
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentInfo>,
    /// True once the order has been sent to the kitchen at least once.
    #[serde(default)]
    pub is_saved: bool,
    /// Quantities as of the last save, keyed by menu item id. The print
    /// delta is current quantity minus this.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub saved_quantities: HashMap<String, i32>,
    /// True when the order sits on a merged virtual table.
    #[serde(default)]
    pub is_merged_order: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merged_table_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub created_at: i64,
}

impl Order {
    pub fn new(id: String, table_id: String, created_at: i64) -> Self {
        Self {
            id,
            table_id,
            status: OrderStatus::Ongoing,
            items: Vec::new(),
            discount_percentage: 0.0,
            payment: None,
            is_saved: false,
            saved_quantities: HashMap::new(),
            is_merged_order: false,
            merged_table_ids: Vec::new(),
            customer_name: None,
            customer_phone: None,
            created_at,
        }
    }

    pub fn item(&self, menu_item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.menu_item_id == menu_item_id)
    }
}

/// Fold one incoming line into an item list, merging by `menu_item_id`.
///
/// On a match the quantities add and the modifiers are replaced by the
/// incoming ones; the existing name and price win. Otherwise the line is
/// appended.
pub fn merge_item_into(items: &mut Vec<OrderItem>, incoming: OrderItem) {
    match items
        .iter_mut()
        .find(|i| i.menu_item_id == incoming.menu_item_id)
    {
        Some(existing) => {
            existing.quantity += incoming.quantity;
            existing.modifiers = incoming.modifiers;
        }
        None => items.push(incoming),
    }
}

/// Fold a batch of lines into a fresh list, merging duplicates.
pub fn fold_items(incoming: Vec<OrderItem>) -> Vec<OrderItem> {
    let mut items = Vec::with_capacity(incoming.len());
    for item in incoming {
        merge_item_into(&mut items, item);
    }
    items
}
