//! ReserveTable / UnreserveTable command handlers.
//!
//! Reservations are lazily expired: a table whose `reserved_until` has
//! passed is treated as free by validation here and by the read side, with
//! no sweeper job mutating state.

use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::{EventPayload, LedgerEvent};

#[derive(Debug, Clone)]
pub struct ReserveTableAction {
    pub table_id: String,
    pub reserved_by: Option<String>,
    pub reserved_until: Option<i64>,
    pub reserved_note: Option<String>,
}

impl CommandHandler for ReserveTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let Some(table) = ctx.state().tables.get(&self.table_id) else {
            return Ok(vec![]);
        };

        if table.is_merged {
            return Err(LedgerError::InvalidOperation(format!(
                "cannot reserve merged table {}",
                self.table_id
            )));
        }
        if !table.is_active {
            return Err(LedgerError::TableInactive(self.table_id.clone()));
        }
        if table.is_reserved_at(metadata.timestamp) {
            return Err(LedgerError::TableReserved(self.table_id.clone()));
        }
        if let Some(until) = self.reserved_until
            && until <= metadata.timestamp
        {
            return Err(LedgerError::InvalidOperation(
                "reservation end must be in the future".to_string(),
            ));
        }

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::TableReserved {
                table_id: self.table_id.clone(),
                reserved_by: self.reserved_by.clone(),
                reserved_until: self.reserved_until,
                reserved_note: self.reserved_note.clone(),
                reserved_at: metadata.timestamp,
            },
        )])
    }
}

#[derive(Debug, Clone)]
pub struct UnreserveTableAction {
    pub table_id: String,
}

impl CommandHandler for UnreserveTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let Some(table) = ctx.state().tables.get(&self.table_id) else {
            return Ok(vec![]);
        };

        // Clearing a stale (expired) reservation still emits the event so
        // the stored flags get cleaned up.
        if !table.is_reserved {
            return Ok(vec![]);
        }

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::TableUnreserved {
                table_id: self.table_id.clone(),
            },
        )])
    }
}
