//! Money & quantity codec
//!
//! Monetary values are integer cents end to end; decimals only exist at the
//! user-facing boundary. Parsing and formatting go through `rust_decimal` so
//! no float round-trip can corrupt a price.
//!
//! Weight quantities are `f64` kilograms with 3 decimal places. Every derived
//! quantity must pass through [`round_qty3`] immediately after computation,
//! before further arithmetic or persistence, so repeated operations cannot
//! accumulate drift.

use rust_decimal::prelude::*;
use thiserror::Error;

/// Tolerance for the stock floor check. Covers float rounding only, not a
/// real overdraft allowance.
pub const STOCK_EPSILON: f64 = 1e-4;

/// Upper bound for a single movement or cash count (1,000,000.00 in cents).
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
}

/// Parse a user-facing decimal price into integer cents.
///
/// Accepts both comma and dot as the decimal separator ("1234,56" and
/// "1234.56" are equivalent). An empty input parses as zero. Rounds to the
/// nearest cent, half away from zero.
pub fn price_to_cents(input: &str) -> Result<i64, MoneyError> {
    let normalized = input.replace(',', ".");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return Ok(0);
    }

    let value = Decimal::from_str(normalized)
        .map_err(|_| MoneyError::InvalidAmount(format!("not a number: {input:?}")))?;

    let cents = (value * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    cents
        .to_i64()
        .ok_or_else(|| MoneyError::InvalidAmount(format!("out of range: {input:?}")))
}

/// Format integer cents with fixed 2-decimal precision ("650000" -> "6500.00").
pub fn cents_to_price(cents: i64) -> String {
    Decimal::new(cents, 2).to_string()
}

/// Round a kg quantity to 3 decimal places.
pub fn round_qty3(qty: f64) -> f64 {
    (qty * 1000.0).round() / 1000.0
}

/// Round a derived monetary value to whole cents.
pub fn round_cents(value: f64) -> i64 {
    value.round() as i64
}

/// Validate an amount is a positive integer within the accepted range.
pub fn validate_amount_cents(amount: i64) -> Result<(), MoneyError> {
    if amount <= 0 {
        return Err(MoneyError::InvalidAmount(format!(
            "must be positive, got {amount}"
        )));
    }
    if amount > MAX_AMOUNT_CENTS {
        return Err(MoneyError::InvalidAmount(format!(
            "exceeds maximum of {MAX_AMOUNT_CENTS}, got {amount}"
        )));
    }
    Ok(())
}

/// Validate a kg quantity crossing the system boundary.
pub fn validate_qty_kg(qty: f64) -> Result<(), MoneyError> {
    if !qty.is_finite() {
        return Err(MoneyError::InvalidQuantity(format!(
            "must be finite, got {qty}"
        )));
    }
    if qty <= 0.0 {
        return Err(MoneyError::InvalidQuantity(format!(
            "must be positive, got {qty}"
        )));
    }
    Ok(())
}
