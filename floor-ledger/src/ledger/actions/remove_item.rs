//! RemoveItem command handler.

use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::{EventPayload, LedgerEvent};

#[derive(Debug, Clone)]
pub struct RemoveItemAction {
    pub order_id: String,
    pub menu_item_id: String,
}

impl CommandHandler for RemoveItemAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let order = ctx.ongoing_order(&self.order_id)?;

        let item = order
            .item(&self.menu_item_id)
            .ok_or_else(|| LedgerError::ItemNotFound(self.menu_item_id.clone()))?;
        let item_name = item.name.clone();

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::ItemRemoved {
                order_id: self.order_id.clone(),
                menu_item_id: self.menu_item_id.clone(),
                item_name,
            },
        )])
    }
}
