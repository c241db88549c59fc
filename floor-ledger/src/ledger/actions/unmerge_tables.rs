//! UnmergeTables command handler.
//!
//! Dissolves a virtual table and reactivates its members. An id that is not
//! a merged table (or does not exist) is a no-op, like the other registry
//! mutators. Rejected while an ongoing order still sits on the virtual
//! table: the order must be settled or cancelled first, since there is no
//! single member to inherit it.

use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::{EventPayload, LedgerEvent};

#[derive(Debug, Clone)]
pub struct UnmergeTablesAction {
    pub merged_table_id: String,
}

impl CommandHandler for UnmergeTablesAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let Some(table) = ctx.state().tables.get(&self.merged_table_id) else {
            return Ok(vec![]);
        };
        if !table.is_merged {
            return Ok(vec![]);
        }
        if let Some(order) = ctx.state().ongoing_order_for_table(&self.merged_table_id) {
            return Err(LedgerError::TableOccupied(format!(
                "{} (order: {})",
                self.merged_table_id, order.id
            )));
        }

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::TablesUnmerged {
                merged_table_id: self.merged_table_id.clone(),
                member_ids: table.merged_tables.clone(),
            },
        )])
    }
}
