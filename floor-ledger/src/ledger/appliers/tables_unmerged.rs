//! TablesUnmerged event applier.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct TablesUnmergedApplier;

impl EventApplier for TablesUnmergedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::TablesUnmerged {
            merged_table_id,
            member_ids,
        } = &event.payload
        {
            state.tables.remove(merged_table_id);
            state.table_order.retain(|id| id != merged_table_id);
            for id in member_ids {
                if let Some(member) = state.tables.get_mut(id) {
                    member.is_active = true;
                }
            }
        }
    }
}
