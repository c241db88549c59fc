//! TableAdded event applier.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct TableAddedApplier;

impl EventApplier for TableAddedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::TableAdded { table } = &event.payload {
            state.table_order.push(table.id.clone());
            state.tables.insert(table.id.clone(), table.clone());
        }
    }
}
