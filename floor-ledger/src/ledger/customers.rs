//! Customer resolution for settlements.

use shared::models::Customer;
use shared::{LedgerState, Order};

/// Outcome of resolving the customer a settlement should be attributed to.
#[derive(Debug, Clone)]
pub enum ResolvedCustomer {
    /// Matched an existing customer record by phone.
    Existing(String),
    /// No match; a new record should be created with these details.
    New { name: String, phone: Option<String> },
    /// No customer information available at all.
    None,
}

/// Resolve the customer for a settlement.
///
/// Details already attached to the order win over details typed at payment
/// time. Phone is the matching key; a name without a phone always creates a
/// fresh record.
pub fn resolve_customer(
    state: &LedgerState,
    order: &Order,
    typed_name: Option<&str>,
    typed_phone: Option<&str>,
) -> ResolvedCustomer {
    let name = order
        .customer_name
        .as_deref()
        .or(typed_name)
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let phone = order
        .customer_phone
        .as_deref()
        .or(typed_phone)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    if let Some(phone) = phone {
        if let Some(existing) = find_by_phone(state, phone) {
            return ResolvedCustomer::Existing(existing.id.clone());
        }
        return ResolvedCustomer::New {
            name: name.unwrap_or(phone).to_string(),
            phone: Some(phone.to_string()),
        };
    }

    match name {
        Some(name) => ResolvedCustomer::New {
            name: name.to_string(),
            phone: None,
        },
        None => ResolvedCustomer::None,
    }
}

pub fn find_by_phone<'a>(state: &'a LedgerState, phone: &str) -> Option<&'a Customer> {
    state
        .customers
        .values()
        .find(|c| c.phone.as_deref() == Some(phone))
}
