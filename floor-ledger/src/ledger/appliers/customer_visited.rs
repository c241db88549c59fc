//! CustomerVisited event applier.
//!
//! Upserts the customer record: credit accrues, the visit counter ticks,
//! and a first visit creates the record.

use crate::ledger::money;
use crate::ledger::traits::EventApplier;
use shared::models::Customer;
use shared::{EventPayload, LedgerEvent, LedgerState};

pub struct CustomerVisitedApplier;

impl EventApplier for CustomerVisitedApplier {
    fn apply(&self, state: &mut LedgerState, event: &LedgerEvent) {
        let EventPayload::CustomerVisited {
            customer_id,
            name,
            phone,
            credit_delta,
            visited_at,
        } = &event.payload
        else {
            return;
        };

        match state.customers.get_mut(customer_id) {
            Some(customer) => {
                customer.credit_amount =
                    money::round_money(customer.credit_amount + credit_delta);
                customer.visit_count += 1;
                customer.last_visit = *visited_at;
            }
            None => {
                let mut customer = Customer::new(
                    customer_id.clone(),
                    name.clone(),
                    phone.clone(),
                    *visited_at,
                );
                customer.credit_amount = money::round_money(*credit_delta);
                customer.visit_count = 1;
                state.customers.insert(customer_id.clone(), customer);
            }
        }
    }
}
