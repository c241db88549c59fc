//! MarkOrderSaved command handler.
//!
//! Records the quantities at the moment of saving; the print delta for the
//! next kitchen ticket is current quantity minus these.

use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::{EventPayload, LedgerEvent};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct MarkOrderSavedAction {
    pub order_id: String,
}

impl CommandHandler for MarkOrderSavedAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let order = ctx.ongoing_order(&self.order_id)?;

        let saved_quantities: HashMap<String, i32> = order
            .items
            .iter()
            .map(|i| (i.menu_item_id.clone(), i.quantity))
            .collect();

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::OrderSaved {
                order_id: self.order_id.clone(),
                saved_quantities,
            },
        )])
    }
}
