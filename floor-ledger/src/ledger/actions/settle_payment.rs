//! SettlePayment command handler (single-method settlements).
//!
//! Settlement is compound: one command emits `PaymentSettled`,
//! `OrderCompleted`, and, when a customer is identified, `CustomerVisited`.
//! Credit settlements post the full total to the customer's credit balance
//! and therefore require an identifiable customer.

use crate::ledger::customers::{resolve_customer, ResolvedCustomer};
use crate::ledger::money;
use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::util::resource_id;
use shared::{EventPayload, LedgerEvent, Order, PaymentInfo, PaymentMethod};

#[derive(Debug, Clone)]
pub struct SettlePaymentAction {
    pub order_id: String,
    pub method: PaymentMethod,
    pub amount_paid: f64,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

/// Resolve the settlement's customer into a `CustomerVisited` payload.
///
/// `credit_delta` is the amount posted to the customer's balance. When
/// `required` and no customer can be identified, the settlement is declined.
pub(super) fn customer_visit(
    ctx: &CommandContext<'_>,
    order: &Order,
    typed_name: Option<&str>,
    typed_phone: Option<&str>,
    credit_delta: f64,
    required: bool,
    visited_at: i64,
) -> Result<Option<EventPayload>, LedgerError> {
    match resolve_customer(ctx.state(), order, typed_name, typed_phone) {
        ResolvedCustomer::Existing(customer_id) => {
            let customer = &ctx.state().customers[&customer_id];
            Ok(Some(EventPayload::CustomerVisited {
                customer_id,
                name: customer.name.clone(),
                phone: customer.phone.clone(),
                credit_delta,
                visited_at,
            }))
        }
        ResolvedCustomer::New { name, phone } => Ok(Some(EventPayload::CustomerVisited {
            customer_id: resource_id("customer"),
            name,
            phone,
            credit_delta,
            visited_at,
        })),
        ResolvedCustomer::None if required => Err(LedgerError::CustomerRequired(
            "credit settlement needs a customer name or phone".to_string(),
        )),
        ResolvedCustomer::None => Ok(None),
    }
}

impl CommandHandler for SettlePaymentAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let order = ctx.ongoing_order(&self.order_id)?;

        if self.method == PaymentMethod::Split {
            return Err(LedgerError::InvalidOperation(
                "split settlements go through SettleSplitPayment".to_string(),
            ));
        }
        money::validate_payment_amount(self.amount_paid)?;

        let totals = money::compute_totals(order);
        if !money::is_payment_sufficient(self.amount_paid, totals.total) {
            return Err(LedgerError::InvalidAmount(format!(
                "amount paid {} does not cover total {}",
                self.amount_paid, totals.total
            )));
        }
        let change = money::change_due(self.amount_paid, totals.total);

        let is_credit = self.method == PaymentMethod::Credit;
        let credit_delta = if is_credit { totals.total } else { 0.0 };
        let visit = customer_visit(
            ctx,
            order,
            self.customer_name.as_deref(),
            self.customer_phone.as_deref(),
            credit_delta,
            is_credit,
            metadata.timestamp,
        )?;

        let (customer_name, customer_phone) = match &visit {
            Some(EventPayload::CustomerVisited { name, phone, .. }) => {
                (Some(name.clone()), phone.clone())
            }
            _ => (None, None),
        };

        let payment = PaymentInfo {
            method: self.method,
            amount: totals.total,
            amount_paid: self.amount_paid,
            change,
            customer_name,
            customer_phone,
            timestamp: metadata.timestamp,
            split_payments: vec![],
            credit_amount: credit_delta,
        };

        let mut events = vec![
            LedgerEvent::new(
                ctx.next_sequence(),
                metadata.timestamp,
                metadata.command_id,
                EventPayload::PaymentSettled {
                    order_id: self.order_id.clone(),
                    payment,
                },
            ),
            LedgerEvent::new(
                ctx.next_sequence(),
                metadata.timestamp,
                metadata.command_id,
                EventPayload::OrderCompleted {
                    order_id: self.order_id.clone(),
                    final_total: totals.total,
                },
            ),
        ];
        if let Some(payload) = visit {
            events.push(LedgerEvent::new(
                ctx.next_sequence(),
                metadata.timestamp,
                metadata.command_id,
                payload,
            ));
        }
        Ok(events)
    }
}
