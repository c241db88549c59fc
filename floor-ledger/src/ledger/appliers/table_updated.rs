//! TableUpdated event applier.
//!
//! Seat changes on a merge member propagate to the containing virtual
//! table's seat total.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct TableUpdatedApplier;

impl EventApplier for TableUpdatedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        let EventPayload::TableUpdated {
            table_id,
            name,
            seats,
            description,
        } = &event.payload
        else {
            return;
        };

        let Some(table) = state.tables.get_mut(table_id) else {
            return;
        };
        if let Some(name) = name {
            table.name = name.clone();
        }
        if let Some(seats) = seats {
            table.seats = *seats;
        }
        if let Some(description) = description {
            table.description = Some(description.clone());
        }

        if name.is_some() || seats.is_some() {
            refresh_containing_merge(state, table_id);
        }
    }
}

/// Recompute the member names and seat total of any merged table that
/// contains `member_id`.
fn refresh_containing_merge(state: &mut LedgerState, member_id: &str) {
    let merged_id = state
        .tables
        .values()
        .find(|t| t.is_merged && t.merged_tables.contains(&member_id.to_string()))
        .map(|t| t.id.clone());
    let Some(merged_id) = merged_id else {
        return;
    };

    let member_ids = match state.tables.get(&merged_id) {
        Some(merged) => merged.merged_tables.clone(),
        None => return,
    };
    let mut names = Vec::with_capacity(member_ids.len());
    let mut total = 0;
    for id in &member_ids {
        if let Some(member) = state.tables.get(id) {
            names.push(member.name.clone());
            total += member.seats;
        }
    }

    if let Some(merged) = state.tables.get_mut(&merged_id) {
        merged.merged_table_names = names;
        merged.seats = total;
        merged.total_seats = Some(total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Table;
    use uuid::Uuid;

    fn event(table_id: &str, seats: Option<i32>) -> LedgerEvent {
        LedgerEvent::new(
            1,
            0,
            Uuid::new_v4(),
            EventPayload::TableUpdated {
                table_id: table_id.to_string(),
                name: None,
                seats,
                description: None,
            },
        )
    }

    #[test]
    fn test_member_seat_change_updates_merge_total() {
        let mut state = LedgerState::default();
        for (id, seats) in [("t1", 4), ("t2", 4)] {
            let t = Table::new(id.into(), id.to_uppercase(), seats, None, 0);
            state.table_order.push(t.id.clone());
            state.tables.insert(t.id.clone(), t);
        }
        let mut merged = Table::new("m1".into(), "M1".into(), 8, None, 0);
        merged.is_merged = true;
        merged.merged_tables = vec!["t1".into(), "t2".into()];
        merged.total_seats = Some(8);
        state.tables.insert("m1".into(), merged);

        TableUpdatedApplier.apply(&mut state, &event("t1", Some(10)));

        assert_eq!(state.tables["t1"].seats, 10);
        assert_eq!(state.tables["m1"].total_seats, Some(14));
        assert_eq!(state.tables["m1"].seats, 14);
    }

    #[test]
    fn test_member_rename_refreshes_merge_names() {
        let mut state = LedgerState::default();
        for (id, seats) in [("t1", 4), ("t2", 6)] {
            let t = Table::new(id.into(), id.to_uppercase(), seats, None, 0);
            state.table_order.push(t.id.clone());
            state.tables.insert(t.id.clone(), t);
        }
        let mut merged = Table::new("m1".into(), "M1".into(), 10, None, 0);
        merged.is_merged = true;
        merged.merged_tables = vec!["t1".into(), "t2".into()];
        merged.merged_table_names = vec!["T1".into(), "T2".into()];
        merged.total_seats = Some(10);
        state.tables.insert("m1".into(), merged);

        let rename = LedgerEvent::new(
            1,
            0,
            Uuid::new_v4(),
            EventPayload::TableUpdated {
                table_id: "t1".to_string(),
                name: Some("Patio 1".to_string()),
                seats: None,
                description: None,
            },
        );
        TableUpdatedApplier.apply(&mut state, &rename);

        assert_eq!(
            state.tables["m1"].merged_table_names,
            vec!["Patio 1".to_string(), "T2".to_string()]
        );
        assert_eq!(state.tables["m1"].total_seats, Some(10));
    }

    #[test]
    fn test_update_on_missing_table_is_ignored() {
        let mut state = LedgerState::default();
        TableUpdatedApplier.apply(&mut state, &event("ghost", Some(2)));
        assert!(state.tables.is_empty());
    }
}
