//! ToggleTableStatus command handler.
//!
//! Merge bookkeeping owns the active flag of virtual tables and their
//! members, so those cannot be toggled directly. Deactivating an occupied
//! table is rejected: the order would become unreachable on the floor plan.

use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::{EventPayload, LedgerEvent};

#[derive(Debug, Clone)]
pub struct ToggleTableStatusAction {
    pub table_id: String,
}

impl CommandHandler for ToggleTableStatusAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let state = ctx.state();
        let Some(table) = state.tables.get(&self.table_id) else {
            return Ok(vec![]);
        };

        if table.is_merged {
            return Err(LedgerError::InvalidOperation(format!(
                "cannot toggle merged table {}",
                self.table_id
            )));
        }
        if state
            .tables
            .values()
            .any(|t| t.is_merged && t.merged_tables.contains(&self.table_id))
        {
            return Err(LedgerError::InvalidOperation(format!(
                "table {} is part of a merge",
                self.table_id
            )));
        }
        if table.is_active && state.ongoing_order_for_table(&self.table_id).is_some() {
            return Err(LedgerError::TableOccupied(self.table_id.clone()));
        }

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::TableStatusToggled {
                table_id: self.table_id.clone(),
                is_active: !table.is_active,
            },
        )])
    }
}
