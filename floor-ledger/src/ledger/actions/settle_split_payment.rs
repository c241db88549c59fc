//! SettleSplitPayment command handler.
//!
//! Portions must sum to the order total within money tolerance; there is no
//! change on a split. A Credit portion posts to the customer's balance, so
//! it requires an identifiable customer.

use super::settle_payment::customer_visit;
use crate::ledger::money;
use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use rust_decimal::prelude::*;
use shared::{EventPayload, LedgerEvent, PaymentInfo, PaymentMethod, SplitPortion};

#[derive(Debug, Clone)]
pub struct SettleSplitPaymentAction {
    pub order_id: String,
    pub splits: Vec<SplitPortion>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

impl CommandHandler for SettleSplitPaymentAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let order = ctx.ongoing_order(&self.order_id)?;

        if self.splits.is_empty() {
            return Err(LedgerError::InvalidOperation(
                "split settlement needs at least one portion".to_string(),
            ));
        }
        for portion in &self.splits {
            if portion.method == PaymentMethod::Split {
                return Err(LedgerError::InvalidOperation(
                    "a split portion cannot itself be Split".to_string(),
                ));
            }
            money::validate_payment_amount(portion.amount)?;
        }

        let totals = money::compute_totals(order);
        let sum = money::sum_splits(&self.splits);
        if !money::money_eq(sum, totals.total) {
            return Err(LedgerError::InvalidAmount(format!(
                "split portions sum to {} but total is {}",
                sum, totals.total
            )));
        }

        let credit_portion = money::sum_splits(
            &self
                .splits
                .iter()
                .filter(|p| p.method == PaymentMethod::Credit)
                .cloned()
                .collect::<Vec<_>>(),
        );
        let visit = customer_visit(
            ctx,
            order,
            self.customer_name.as_deref(),
            self.customer_phone.as_deref(),
            credit_portion,
            credit_portion > 0.0,
            metadata.timestamp,
        )?;

        let (customer_name, customer_phone) = match &visit {
            Some(EventPayload::CustomerVisited { name, phone, .. }) => {
                (Some(name.clone()), phone.clone())
            }
            _ => (None, None),
        };

        // Tendered amount excludes the credit portion.
        let amount_paid = (Decimal::from_f64(totals.total).unwrap_or_default()
            - Decimal::from_f64(credit_portion).unwrap_or_default())
        .to_f64()
        .unwrap_or(0.0);
        let payment = PaymentInfo {
            method: PaymentMethod::Split,
            amount: totals.total,
            amount_paid: money::round_money(amount_paid),
            change: 0.0,
            customer_name,
            customer_phone,
            timestamp: metadata.timestamp,
            split_payments: self.splits.clone(),
            credit_amount: credit_portion,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::traits::test_support::{
        add_ongoing_order, item, metadata, new_ctx, state_with_table,
    };
    use shared::LedgerState;

    fn portion(method: PaymentMethod, amount: f64) -> SplitPortion {
        SplitPortion { method, amount }
    }

    fn split(portions: Vec<SplitPortion>) -> SettleSplitPaymentAction {
        SettleSplitPaymentAction {
            order_id: "o1".to_string(),
            splits: portions,
            customer_name: None,
            customer_phone: None,
        }
    }

    fn state_with_order(total: f64) -> LedgerState {
        let mut state = state_with_table("t1");
        add_ongoing_order(&mut state, "o1", "t1", vec![item("momo", total, 1)]);
        state
    }

    #[test]
    fn test_split_covering_total_settles() {
        let state = state_with_order(100.0);
        let mut ctx = new_ctx(&state);

        let events = split(vec![
            portion(PaymentMethod::Cash, 60.0),
            portion(PaymentMethod::Card, 40.0),
        ])
        .execute(&mut ctx, &metadata())
        .unwrap();
        assert_eq!(events.len(), 2);
        match &events[0].payload {
            EventPayload::PaymentSettled { payment, .. } => {
                assert_eq!(payment.method, PaymentMethod::Split);
                assert_eq!(payment.amount_paid, 100.0);
                assert_eq!(payment.change, 0.0);
                assert_eq!(payment.split_payments.len(), 2);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_sum_fails() {
        let state = state_with_order(100.0);
        let mut ctx = new_ctx(&state);

        assert!(matches!(
            split(vec![
                portion(PaymentMethod::Cash, 60.0),
                portion(PaymentMethod::Card, 39.0),
            ])
            .execute(&mut ctx, &metadata()),
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_sum_within_tolerance_settles() {
        let state = state_with_order(100.0);
        let mut ctx = new_ctx(&state);

        assert!(split(vec![
            portion(PaymentMethod::Cash, 60.0),
            portion(PaymentMethod::Card, 39.995),
        ])
        .execute(&mut ctx, &metadata())
        .is_ok());
    }

    #[test]
    fn test_credit_portion_requires_customer() {
        let state = state_with_order(100.0);
        let mut ctx = new_ctx(&state);

        assert!(matches!(
            split(vec![
                portion(PaymentMethod::Cash, 70.0),
                portion(PaymentMethod::Credit, 30.0),
            ])
            .execute(&mut ctx, &metadata()),
            Err(LedgerError::CustomerRequired(_))
        ));
    }

    #[test]
    fn test_credit_portion_excluded_from_amount_paid() {
        let mut state = state_with_order(100.0);
        state.orders.get_mut("o1").unwrap().customer_name = Some("Asha".to_string());
        let mut ctx = new_ctx(&state);

        let events = split(vec![
            portion(PaymentMethod::Cash, 70.0),
            portion(PaymentMethod::Credit, 30.0),
        ])
        .execute(&mut ctx, &metadata())
        .unwrap();
        assert_eq!(events.len(), 3);
        match &events[0].payload {
            EventPayload::PaymentSettled { payment, .. } => {
                assert_eq!(payment.amount_paid, 70.0);
                assert_eq!(payment.credit_amount, 30.0);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
        assert!(matches!(
            &events[2].payload,
            EventPayload::CustomerVisited { credit_delta, .. } if *credit_delta == 30.0
        ));
    }

    #[test]
    fn test_nested_split_portion_fails() {
        let state = state_with_order(50.0);
        let mut ctx = new_ctx(&state);

        assert!(matches!(
            split(vec![portion(PaymentMethod::Split, 50.0)]).execute(&mut ctx, &metadata()),
            Err(LedgerError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_empty_split_fails() {
        let state = state_with_order(50.0);
        let mut ctx = new_ctx(&state);

        assert!(matches!(
            split(vec![]).execute(&mut ctx, &metadata()),
            Err(LedgerError::InvalidOperation(_))
        ));
    }
}
