//! ApplyDiscount command handler.
//!
//! Discounts are stored as a percentage of the subtotal. Flat-amount
//! discounts are converted to the equivalent percentage by callers (see
//! `money::discount_amount_to_percentage`), so the realized discount scales
//! with later item changes.

use crate::ledger::money;
use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::{EventPayload, LedgerEvent};

#[derive(Debug, Clone)]
pub struct ApplyDiscountAction {
    pub order_id: String,
    pub discount_percentage: f64,
}

impl CommandHandler for ApplyDiscountAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        ctx.ongoing_order(&self.order_id)?;
        money::validate_discount_percentage(self.discount_percentage)?;

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::DiscountApplied {
                order_id: self.order_id.clone(),
                discount_percentage: self.discount_percentage,
            },
        )])
    }
}
