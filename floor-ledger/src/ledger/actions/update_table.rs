//! UpdateTable command handler.
//!
//! Unknown table ids are acknowledged without effect, matching the other
//! registry mutators: the floor plan may have changed under a stale client.

use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::{EventPayload, LedgerEvent};

#[derive(Debug, Clone)]
pub struct UpdateTableAction {
    pub table_id: String,
    pub name: Option<String>,
    pub seats: Option<i32>,
    pub description: Option<String>,
}

impl CommandHandler for UpdateTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        if !ctx.state().tables.contains_key(&self.table_id) {
            return Ok(vec![]);
        }

        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(LedgerError::InvalidOperation(
                "table name must not be empty".to_string(),
            ));
        }
        if let Some(seats) = self.seats
            && seats <= 0
        {
            return Err(LedgerError::InvalidOperation(format!(
                "seats must be positive, got {}",
                seats
            )));
        }

        if self.name.is_none() && self.seats.is_none() && self.description.is_none() {
            return Ok(vec![]);
        }

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::TableUpdated {
                table_id: self.table_id.clone(),
                name: self.name.as_deref().map(|n| n.trim().to_string()),
                seats: self.seats,
                description: self.description.clone(),
            },
        )])
    }
}
