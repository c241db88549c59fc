//! TablesMerged event applier.
//!
//! Inserts the virtual table and deactivates the members. Member records
//! stay in the registry; unmerging brings them back unchanged.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct TablesMergedApplier;

impl EventApplier for TablesMergedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::TablesMerged {
            merged_table,
            member_ids,
        } = &event.payload
        {
            state.table_order.push(merged_table.id.clone());
            state
                .tables
                .insert(merged_table.id.clone(), merged_table.clone());
            for id in member_ids {
                if let Some(member) = state.tables.get_mut(id) {
                    member.is_active = false;
                }
            }
        }
    }
}
