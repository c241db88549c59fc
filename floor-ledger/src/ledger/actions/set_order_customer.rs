//! SetOrderCustomer command handler.

use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::{EventPayload, LedgerEvent};

#[derive(Debug, Clone)]
pub struct SetOrderCustomerAction {
    pub order_id: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

impl CommandHandler for SetOrderCustomerAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        ctx.ongoing_order(&self.order_id)?;

        let name = self
            .customer_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let phone = self
            .customer_phone
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let seq = ctx.next_sequence();
        Ok(vec![LedgerEvent::new(
            seq,
            metadata.timestamp,
            metadata.command_id,
            EventPayload::OrderCustomerSet {
                order_id: self.order_id.clone(),
                customer_name: name,
                customer_phone: phone,
            },
        )])
    }
}
