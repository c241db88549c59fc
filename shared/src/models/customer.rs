//! Customer Model

use serde::{Deserialize, Serialize};

/// A customer known to the credit ledger.
///
/// Created lazily the first time a settlement names a customer; `phone` is
/// the primary matching key when present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Outstanding balance owed by the customer.
    #[serde(default)]
    pub credit_amount: f64,
    #[serde(default)]
    pub visit_count: u32,
    pub last_visit: i64,
    pub created_at: i64,
}

impl Customer {
    pub fn new(id: String, name: String, phone: Option<String>, created_at: i64) -> Self {
        Self {
            id,
            name,
            phone,
            credit_amount: 0.0,
            visit_count: 0,
            last_visit: created_at,
            created_at,
        }
    }
}
