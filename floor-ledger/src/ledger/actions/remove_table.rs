//! RemoveTable command handler.
//!
//! A table cannot be removed while an ongoing order sits on it, while it is
//! a merged virtual table, or while it is a member of one.

use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::{EventPayload, LedgerEvent};

#[derive(Debug, Clone)]
pub struct RemoveTableAction {
    pub table_id: String,
}

impl CommandHandler for RemoveTableAction {
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
                "cannot remove merged table {}; unmerge it first",
                self.table_id
            )));
        }
        let member_of = state
            .tables
            .values()
            .find(|t| t.is_merged && t.merged_tables.contains(&self.table_id));
        if let Some(merged) = member_of {
            return Err(LedgerError::InvalidOperation(format!(
                "table {} is part of merged table {}",
                self.table_id, merged.id
            )));
        }
        if state.ongoing_order_for_table(&self.table_id).is_some() {
            return Err(LedgerError::TableOccupied(self.table_id.clone()));
        }

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::TableRemoved {
                table_id: self.table_id.clone(),
            },
        )])
    }
}
