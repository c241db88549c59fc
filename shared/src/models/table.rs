//! Table Model

use serde::{Deserialize, Serialize};

/// A table on the restaurant floor.
///
/// A table is either a physical table or a *merged* virtual table created by
/// the merge orchestrator. Merge members keep their record but are
/// deactivated for as long as the merge exists; they are never deleted by a
/// merge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Table {
    pub id: String,
    pub name: String,
    pub seats: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// False while merged into another table or soft-disabled.
    pub is_active: bool,

    // === Merge fields (only meaningful when is_merged) ===
    #[serde(default)]
    pub is_merged: bool,
    /// Member table ids, in merge input order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merged_tables: Vec<String>,
    /// Member table names, same order as `merged_tables`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merged_table_names: Vec<String>,
    /// Sum of member seats; present only on merged tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_seats: Option<i32>,

    // === Reservation fields ===
    #[serde(default)]
    pub is_reserved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_at: Option<i64>,
    /// Epoch ms; absence means the reservation holds indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_until: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_note: Option<String>,

    pub created_at: i64,
}

impl Table {
    /// Create a standalone physical table.
    pub fn new(
        id: String,
        name: String,
        seats: i32,
        description: Option<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            name,
            seats,
            description,
            is_active: true,
            is_merged: false,
            merged_tables: Vec::new(),
            merged_table_names: Vec::new(),
            total_seats: None,
            is_reserved: false,
            reserved_at: None,
            reserved_until: None,
            reserved_by: None,
            reserved_note: None,
            created_at,
        }
    }

    /// Whether the table is effectively reserved at `now`.
    ///
    /// Expiry is derived at read time: a stored reservation whose
    /// `reserved_until` has passed counts as not reserved, without any
    /// mutation of the record.
    pub fn is_reserved_at(&self, now: i64) -> bool {
        if !self.is_reserved {
            return false;
        }
        match self.reserved_until {
            Some(until) => until > now,
            None => true,
        }
    }

    /// Whether the table can take a new booking at `now`:
    /// active, not a merged virtual table, not effectively reserved.
    pub fn is_bookable(&self, now: i64) -> bool {
        self.is_active && !self.is_merged && !self.is_reserved_at(now)
    }
}
