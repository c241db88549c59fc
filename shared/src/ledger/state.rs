//! Persisted ledger state.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

use super::order::{Order, OrderStatus};
use crate::models::{Customer, Table};

/// The whole floor in one tree: tables, orders, customers, plus the
/// sequence watermark and a checksum over the identity-bearing parts.
///
/// The state is persisted as a single value and replaced wholesale on every
/// committed command, so readers always see a consistent snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerState {
    pub tables: HashMap<String, Table>,
    /// Display order for the floor plan.
    #[serde(default)]
    pub table_order: Vec<String>,
    pub orders: HashMap<String, Order>,
    /// Ongoing order ids, most recent first.
    #[serde(default)]
    pub ongoing_ids: Vec<String>,
    /// Completed order ids, most recent first.
    #[serde(default)]
    pub completed_ids: Vec<String>,
    pub customers: HashMap<String, Customer>,
    /// Sequence of the last applied event.
    #[serde(default)]
    pub last_sequence: u64,
    #[serde(default)]
    pub state_checksum: String,
}

impl LedgerState {
    /// The ongoing order sitting on `table_id`, if any. At most one exists
    /// per table.
    pub fn ongoing_order_for_table(&self, table_id: &str) -> Option<&Order> {
        self.ongoing_ids
            .iter()
            .filter_map(|id| self.orders.get(id))
            .find(|o| o.status == OrderStatus::Ongoing && o.table_id == table_id)
    }

    fn compute_checksum(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.last_sequence.to_le_bytes());
        let mut table_ids: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        table_ids.sort_unstable();
        for id in table_ids {
            hasher.update(id.as_bytes());
            hasher.update(b"|");
        }
        for id in &self.ongoing_ids {
            hasher.update(id.as_bytes());
            hasher.update(b"|");
        }
        for id in &self.completed_ids {
            hasher.update(id.as_bytes());
            hasher.update(b"|");
        }
        let digest = hasher.finalize();
        // First 8 bytes as hex is plenty for corruption detection.
        digest[..8].iter().map(|b| format!("{b:02x}")).collect()
    }

    pub fn update_checksum(&mut self) {
        self.state_checksum = self.compute_checksum();
    }

    pub fn verify_checksum(&self) -> bool {
        self.state_checksum.is_empty() || self.state_checksum == self.compute_checksum()
    }
}
