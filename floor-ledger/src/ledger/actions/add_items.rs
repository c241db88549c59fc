//! AddItems command handler.

use crate::ledger::money;
use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::{EventPayload, LedgerEvent, OrderItem};

#[derive(Debug, Clone)]
pub struct AddItemsAction {
    pub order_id: String,
    pub items: Vec<OrderItem>,
}

impl CommandHandler for AddItemsAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        ctx.ongoing_order(&self.order_id)?;

        if self.items.is_empty() {
            return Err(LedgerError::InvalidOperation(
                "items must not be empty".to_string(),
            ));
        }
        for item in &self.items {
            money::validate_order_item(item)?;
        }

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::ItemsAdded {
                order_id: self.order_id.clone(),
                items: self.items.clone(),
            },
        )])
    }
}
