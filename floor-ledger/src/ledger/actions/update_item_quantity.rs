//! UpdateItemQuantity command handler.
//!
//! A quantity of zero or less degrades to a removal, so state never carries
//! zero-quantity lines.

use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::{EventPayload, LedgerEvent};

const MAX_QUANTITY: i32 = 9999;

#[derive(Debug, Clone)]
pub struct UpdateItemQuantityAction {
    pub order_id: String,
    pub menu_item_id: String,
    pub quantity: i32,
}

impl CommandHandler for UpdateItemQuantityAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let order = ctx.ongoing_order(&self.order_id)?;

        let item = order
            .item(&self.menu_item_id)
            .ok_or_else(|| LedgerError::ItemNotFound(self.menu_item_id.clone()))?;

        if self.quantity > MAX_QUANTITY {
            return Err(LedgerError::InvalidOperation(format!(
                "quantity exceeds maximum allowed ({}), got {}",
                MAX_QUANTITY, self.quantity
            )));
        }

        let payload = if self.quantity <= 0 {
            EventPayload::ItemRemoved {
                order_id: self.order_id.clone(),
                menu_item_id: self.menu_item_id.clone(),
                item_name: item.name.clone(),
            }
        } else {
            EventPayload::ItemQuantityUpdated {
                order_id: self.order_id.clone(),
                menu_item_id: self.menu_item_id.clone(),
                quantity: self.quantity,
            }
        };

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            payload,
        )])
    }
}
