//! AddTable command handler.

use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::models::Table;
use shared::util::resource_id;
use shared::{EventPayload, LedgerEvent};

const DEFAULT_SEATS: i32 = 4;

#[derive(Debug, Clone)]
pub struct AddTableAction {
    pub name: String,
    pub seats: Option<i32>,
    pub description: Option<String>,
}

impl CommandHandler for AddTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidOperation(
                "table name must not be empty".to_string(),
            ));
        }

        let seats = self.seats.unwrap_or(DEFAULT_SEATS);
        if seats <= 0 {
            return Err(LedgerError::InvalidOperation(format!(
                "seats must be positive, got {}",
                seats
            )));
        }

        let table = Table::new(
            resource_id("table"),
            name.to_string(),
            seats,
            self.description.clone(),
            metadata.timestamp,
        );

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::TableAdded { table },
        )])
    }
}
