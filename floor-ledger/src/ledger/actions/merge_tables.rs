//! MergeTables command handler.
//!
//! Creates a virtual table spanning the members and, when members carry
//! ongoing orders, consolidates them into the earliest-opened one. Both
//! events come out of the same command, so the merge is all-or-nothing.

use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::models::Table;
use shared::util::resource_id;
use shared::{merge_item_into, EventPayload, LedgerEvent, Order};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct MergeTablesAction {
    pub table_ids: Vec<String>,
    pub merged_name: String,
    pub merged_table_id: Option<String>,
}

impl CommandHandler for MergeTablesAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let unique: HashSet<&String> = self.table_ids.iter().collect();
        if self.table_ids.len() < 2 || unique.len() != self.table_ids.len() {
            return Err(LedgerError::InvalidOperation(
                "merge requires at least two distinct tables".to_string(),
            ));
        }
        if self.merged_name.trim().is_empty() {
            return Err(LedgerError::InvalidOperation(
                "merged table name must not be empty".to_string(),
            ));
        }

        let state = ctx.state();
        let mut members = Vec::with_capacity(self.table_ids.len());
        for id in &self.table_ids {
            let table = ctx.table(id)?;
            if table.is_merged {
                return Err(LedgerError::InvalidOperation(format!(
                    "table {} is already a merged table",
                    id
                )));
            }
            if state
                .tables
                .values()
                .any(|t| t.is_merged && t.merged_tables.contains(id))
            {
                return Err(LedgerError::InvalidOperation(format!(
                    "table {} is already part of a merge",
                    id
                )));
            }
            if !table.is_active {
                return Err(LedgerError::TableInactive(id.clone()));
            }
            if table.is_reserved_at(metadata.timestamp) {
                return Err(LedgerError::TableReserved(id.clone()));
            }
            members.push(table);
        }

        let merged_id = self
            .merged_table_id
            .clone()
            .unwrap_or_else(|| resource_id("merge"));
        if state.tables.contains_key(&merged_id) {
            return Err(LedgerError::InvalidOperation(format!(
                "table id {} already exists",
                merged_id
            )));
        }

        let total_seats: i32 = members.iter().map(|t| t.seats).sum();
        let mut merged_table = Table::new(
            merged_id.clone(),
            self.merged_name.trim().to_string(),
            total_seats,
            None,
            metadata.timestamp,
        );
        merged_table.is_merged = true;
        merged_table.merged_tables = self.table_ids.clone();
        merged_table.merged_table_names = members.iter().map(|t| t.name.clone()).collect();
        merged_table.total_seats = Some(total_seats);

        let mut events = Vec::with_capacity(2);
        let seq = ctx.next_sequence();
        events.push(LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::TablesMerged {
                merged_table,
                member_ids: self.table_ids.clone(),
            },
        ));

        // Consolidate any ongoing member orders into the earliest-opened one.
        let mut member_orders: Vec<&Order> = self
            .table_ids
            .iter()
            .filter_map(|id| ctx.state().ongoing_order_for_table(id))
            .collect();
        if !member_orders.is_empty() {
            member_orders.sort_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.id.cmp(&b.id))
            });
            let survivor = member_orders[0];

            let mut items = survivor.items.clone();
            let mut saved_quantities: HashMap<String, i32> = survivor.saved_quantities.clone();
            let mut absorbed_order_ids = Vec::new();
            for absorbed in &member_orders[1..] {
                for item in absorbed.items.clone() {
                    merge_item_into(&mut items, item);
                }
                for (menu_item_id, qty) in &absorbed.saved_quantities {
                    *saved_quantities.entry(menu_item_id.clone()).or_insert(0) += qty;
                }
                absorbed_order_ids.push(absorbed.id.clone());
            }

            let seq = ctx.next_sequence();
            events.push(LedgerEvent::new(
                seq,
                metadata.timestamp,
                metadata.command_id,
                EventPayload::OrdersConsolidated {
                    surviving_order_id: survivor.id.clone(),
                    merged_table_id: merged_id,
                    member_table_ids: self.table_ids.clone(),
                    absorbed_order_ids,
                    items,
                    saved_quantities,
                },
            ));
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::traits::test_support::{
        add_ongoing_order, insert_table, item, metadata, new_ctx, state_with_table, table,
    };

    fn merge(ids: &[&str]) -> MergeTablesAction {
        MergeTablesAction {
            table_ids: ids.iter().map(|s| s.to_string()).collect(),
            merged_name: "T1+T2".to_string(),
            merged_table_id: None,
        }
    }

    fn two_tables() -> shared::LedgerState {
        let mut state = state_with_table("t1");
        insert_table(&mut state, table("t2"));
        state
    }

    #[test]
    fn test_merge_emits_virtual_table_with_seat_total() {
        let mut state = two_tables();
        state.tables.get_mut("t2").unwrap().seats = 6;
        let mut ctx = new_ctx(&state);

        let events = merge(&["t1", "t2"]).execute(&mut ctx, &metadata()).unwrap();
        assert_eq!(events.len(), 1);
        match &events[0].payload {
            EventPayload::TablesMerged {
                merged_table,
                member_ids,
            } => {
                assert!(merged_table.is_merged);
                assert_eq!(merged_table.total_seats, Some(10));
                assert_eq!(merged_table.merged_table_names.len(), 2);
                assert_eq!(member_ids, &vec!["t1".to_string(), "t2".to_string()]);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_merge_consolidates_member_orders_into_earliest() {
        let mut state = two_tables();
        add_ongoing_order(&mut state, "o-late", "t1", vec![item("momo", 6.0, 2)]);
        add_ongoing_order(&mut state, "o-early", "t2", vec![item("momo", 6.0, 1)]);
        state.orders.get_mut("o-early").unwrap().created_at = 1;
        state.orders.get_mut("o-late").unwrap().created_at = 2;
        let mut ctx = new_ctx(&state);

        let events = merge(&["t1", "t2"]).execute(&mut ctx, &metadata()).unwrap();
        assert_eq!(events.len(), 2);
        match &events[1].payload {
            EventPayload::OrdersConsolidated {
                surviving_order_id,
                absorbed_order_ids,
                items,
                ..
            } => {
                assert_eq!(surviving_order_id, "o-early");
                assert_eq!(absorbed_order_ids, &vec!["o-late".to_string()]);
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].quantity, 3);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_merge_requires_two_distinct_tables() {
        let state = two_tables();
        let mut ctx = new_ctx(&state);

        assert!(matches!(
            merge(&["t1"]).execute(&mut ctx, &metadata()),
            Err(LedgerError::InvalidOperation(_))
        ));
        assert!(matches!(
            merge(&["t1", "t1"]).execute(&mut ctx, &metadata()),
            Err(LedgerError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_merge_with_reserved_member_fails() {
        let mut state = two_tables();
        {
            let t = state.tables.get_mut("t2").unwrap();
            t.is_reserved = true;
            t.reserved_until = None;
        }
        let mut ctx = new_ctx(&state);

        assert!(matches!(
            merge(&["t1", "t2"]).execute(&mut ctx, &metadata()),
            Err(LedgerError::TableReserved(_))
        ));
    }

    #[test]
    fn test_merge_with_already_merged_member_fails() {
        let mut state = two_tables();
        insert_table(&mut state, table("t3"));
        let mut merged = table("m1");
        merged.is_merged = true;
        merged.merged_tables = vec!["t3".to_string()];
        insert_table(&mut state, merged);
        let mut ctx = new_ctx(&state);

        assert!(matches!(
            merge(&["t1", "t3"]).execute(&mut ctx, &metadata()),
            Err(LedgerError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_merge_unknown_member_fails() {
        let state = two_tables();
        let mut ctx = new_ctx(&state);

        assert!(matches!(
            merge(&["t1", "ghost"]).execute(&mut ctx, &metadata()),
            Err(LedgerError::TableNotFound(_))
        ));
    }
}
