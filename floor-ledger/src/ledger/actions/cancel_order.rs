//! CancelOrder command handler.

use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::{EventPayload, LedgerEvent};

#[derive(Debug, Clone)]
pub struct CancelOrderAction {
    pub order_id: String,
}

impl CommandHandler for CancelOrderAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        ctx.ongoing_order(&self.order_id)?;

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::OrderCancelled {
                order_id: self.order_id.clone(),
            },
        )])
    }
}
