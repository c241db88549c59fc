//! ChangeOrderTable command handler.
//!
//! Moves an ongoing order to a different table. Merged orders stay put until
//! the merge is dissolved. The target must be able to take it: present,
//! active, not effectively reserved, not occupied, and not a member of a
//! merge.

use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::{EventPayload, LedgerEvent};

#[derive(Debug, Clone)]
pub struct ChangeOrderTableAction {
    pub order_id: String,
    pub new_table_id: String,
}

impl CommandHandler for ChangeOrderTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let order = ctx.ongoing_order(&self.order_id)?;
        let source_table_id = order.table_id.clone();

        if source_table_id == self.new_table_id {
            return Ok(vec![]);
        }
        if order.is_merged_order {
            return Err(LedgerError::InvalidOperation(format!(
                "order {} belongs to a merged table; unmerge first",
                self.order_id
            )));
        }

        let target = ctx.table(&self.new_table_id)?;
        if !target.is_active {
            return Err(LedgerError::TableInactive(self.new_table_id.clone()));
        }
        if target.is_reserved_at(metadata.timestamp) {
            return Err(LedgerError::TableReserved(self.new_table_id.clone()));
        }
        if let Some(existing) = ctx.state().ongoing_order_for_table(&self.new_table_id) {
            return Err(LedgerError::TableOccupied(format!(
                "{} (order: {})",
                self.new_table_id, existing.id
            )));
        }

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::OrderTableChanged {
                order_id: self.order_id.clone(),
                source_table_id,
                new_table_id: self.new_table_id.clone(),
            },
        )])
    }
}
