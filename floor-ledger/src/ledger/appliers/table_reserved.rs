//! TableReserved / TableUnreserved event appliers.

use crate::ledger::traits::EventApplier;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct TableReservedApplier;

impl EventApplier for TableReservedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::TableReserved {
            table_id,
            reserved_by,
            reserved_until,
            reserved_note,
            reserved_at,
        } = &event.payload
            && let Some(table) = state.tables.get_mut(table_id)
        {
            table.is_reserved = true;
            table.reserved_at = Some(*reserved_at);
            table.reserved_until = *reserved_until;
            table.reserved_by = reserved_by.clone();
            table.reserved_note = reserved_note.clone();
        }
    }
}

pub struct TableUnreservedApplier;

impl EventApplier for TableUnreservedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        if let EventPayload::TableUnreserved { table_id } = &event.payload
            && let Some(table) = state.tables.get_mut(table_id)
        {
            table.is_reserved = false;
            table.reserved_at = None;
            table.reserved_until = None;
            table.reserved_by = None;
            table.reserved_note = None;
        }
    }
}
