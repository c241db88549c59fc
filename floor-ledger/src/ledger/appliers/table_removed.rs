//! TableRemoved event applier.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct TableRemovedApplier;

impl EventApplier for TableRemovedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::TableRemoved { table_id } = &event.payload {
            state.tables.remove(table_id);
            state.table_order.retain(|id| id != table_id);
        }
    }
}
