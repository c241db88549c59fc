//! TableStatusToggled event applier.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct TableStatusToggledApplier;

impl EventApplier for TableStatusToggledApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::TableStatusToggled {
            table_id,
            is_active,
        } = &event.payload
            && let Some(table) = state.tables.get_mut(table_id)
        {
            table.is_active = *is_active;
        }
    }
}
