//! Input validation helpers
//!
//! Centralized text length constants and field validators used by the CRUD
//! handlers before anything touches the database.

use shared::money::MAX_AMOUNT_CENTS;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, cashier, category
pub const MAX_NAME_LEN: usize = 200;

/// Notes attached to movements and shifts
pub const MAX_NOTE_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty after trim and within the
/// length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a cents amount that may be zero (opening/closing cash counts).
pub fn validate_cash_count(value: i64, field: &str) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    if value > MAX_AMOUNT_CENTS {
        return Err(AppError::validation(format!(
            "{field} exceeds the maximum of {MAX_AMOUNT_CENTS}"
        )));
    }
    Ok(())
}

/// Validate a stock-like quantity is finite and non-negative.
pub fn validate_quantity(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number"
        )));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_whitespace_only() {
        assert!(validate_required_text("Ana", "cashier_name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "cashier_name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn cash_count_allows_zero() {
        assert!(validate_cash_count(0, "opening_cash_cents").is_ok());
        assert!(validate_cash_count(-1, "opening_cash_cents").is_err());
        assert!(validate_cash_count(MAX_AMOUNT_CENTS + 1, "opening_cash_cents").is_err());
    }

    #[test]
    fn quantity_rejects_nan() {
        assert!(validate_quantity(0.0, "stock_qty").is_ok());
        assert!(validate_quantity(f64::NAN, "stock_qty").is_err());
        assert!(validate_quantity(-0.5, "stock_qty").is_err());
    }
}
