//! Money calculation utilities using rust_decimal for precision.
//!
//! Monetary values are stored and serialized as `f64`, but every
//! calculation runs through `Decimal` and is rounded to 2 decimal places
//! half-up before going back to `f64`. Comparisons use a cent tolerance.

use crate::ledger::traits::LedgerError;
use rust_decimal::prelude::*;
use shared::{Order, OrderItem, SplitPortion};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: f64 = 0.01;

/// Maximum allowed price per item
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per item
const MAX_QUANTITY: i32 = 9999;
/// Maximum allowed payment amount
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Round a raw f64 amount to money precision.
pub fn round_money(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Whether two amounts are equal within money tolerance.
pub fn money_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < MONEY_TOLERANCE
}

#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), LedgerError> {
    if !value.is_finite() {
        return Err(LedgerError::InvalidAmount(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a line item before it enters an order.
pub fn validate_order_item(item: &OrderItem) -> Result<(), LedgerError> {
    if item.menu_item_id.is_empty() {
        return Err(LedgerError::InvalidOperation(
            "menu_item_id must not be empty".to_string(),
        ));
    }

    require_finite(item.price, "price")?;
    if item.price < 0.0 {
        return Err(LedgerError::InvalidAmount(format!(
            "price must be non-negative, got {}",
            item.price
        )));
    }
    if item.price > MAX_PRICE {
        return Err(LedgerError::InvalidAmount(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, item.price
        )));
    }

    if item.quantity <= 0 {
        return Err(LedgerError::InvalidOperation(format!(
            "quantity must be positive, got {}",
            item.quantity
        )));
    }
    if item.quantity > MAX_QUANTITY {
        return Err(LedgerError::InvalidOperation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, item.quantity
        )));
    }

    Ok(())
}

/// Validate a discount percentage (0..=100).
pub fn validate_discount_percentage(pct: f64) -> Result<(), LedgerError> {
    require_finite(pct, "discount_percentage")?;
    if !(0.0..=100.0).contains(&pct) {
        return Err(LedgerError::InvalidAmount(format!(
            "discount_percentage must be between 0 and 100, got {}",
            pct
        )));
    }
    Ok(())
}

/// Validate a tendered or split amount.
pub fn validate_payment_amount(amount: f64) -> Result<(), LedgerError> {
    require_finite(amount, "payment amount")?;
    if amount <= 0.0 {
        return Err(LedgerError::InvalidAmount(format!(
            "payment amount must be positive, got {}",
            amount
        )));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(LedgerError::InvalidAmount(format!(
            "payment amount exceeds maximum allowed ({}), got {}",
            MAX_PAYMENT_AMOUNT, amount
        )));
    }
    Ok(())
}

/// Order totals derived from items and the discount percentage.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub total: f64,
}

/// Compute subtotal, discount amount and payable total for an order.
///
/// subtotal = Σ price × quantity; the discount percentage applies to the
/// subtotal as a whole. All three values are rounded independently.
pub fn compute_totals(order: &Order) -> OrderTotals {
    let mut subtotal = Decimal::ZERO;
    for item in &order.items {
        subtotal += to_decimal(item.price) * Decimal::from(item.quantity);
    }

    let pct = to_decimal(order.discount_percentage);
    let discount = subtotal * pct / Decimal::from(100);
    let total = subtotal - discount;

    OrderTotals {
        subtotal: to_f64(subtotal),
        discount_amount: to_f64(discount),
        total: to_f64(total),
    }
}

/// Convert a flat discount amount into the equivalent percentage of the
/// current subtotal, clamped to 100. Stored as a percentage: the realized
/// discount scales if items change afterwards.
pub fn discount_amount_to_percentage(order: &Order, amount: f64) -> Result<f64, LedgerError> {
    require_finite(amount, "discount amount")?;
    if amount < 0.0 {
        return Err(LedgerError::InvalidAmount(format!(
            "discount amount must be non-negative, got {}",
            amount
        )));
    }
    let totals = compute_totals(order);
    if totals.subtotal <= 0.0 {
        return Ok(0.0);
    }
    let pct = to_decimal(amount) / to_decimal(totals.subtotal) * Decimal::from(100);
    let pct = pct.min(Decimal::from(100));
    Ok(to_f64(pct))
}

/// Whether the tendered amount covers the total, within tolerance.
pub fn is_payment_sufficient(amount_paid: f64, total: f64) -> bool {
    amount_paid - total > -MONEY_TOLERANCE
}

/// Change due for an overpayment, never negative.
pub fn change_due(amount_paid: f64, total: f64) -> f64 {
    let change = to_decimal(amount_paid) - to_decimal(total);
    if change < Decimal::ZERO {
        0.0
    } else {
        to_f64(change)
    }
}

/// Sum split portions with decimal precision.
pub fn sum_splits(splits: &[SplitPortion]) -> f64 {
    let mut sum = Decimal::ZERO;
    for s in splits {
        sum += to_decimal(s.amount);
    }
    to_f64(sum)
}
