//! Ledger error types

use thiserror::Error;

use crate::db::repository::RepoError;
use crate::utils::AppError;

/// Failure reasons of the ledger transaction engine.
///
/// Business-rule violations abort the whole transaction with zero side
/// effects; `Conflict` is the only transient case and means the caller
/// should retry the whole action.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Product {0} is not sold by weight")]
    UnsupportedUnit(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: f64,
        available: f64,
    },

    #[error("Transaction kept conflicting after {0} attempts")]
    Conflict(u32),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for LedgerError {
    fn from(err: surrealdb::Error) -> Self {
        LedgerError::Database(err.to_string())
    }
}

impl From<RepoError> for LedgerError {
    fn from(err: RepoError) -> Self {
        LedgerError::Database(err.to_string())
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::ProductNotFound(msg) => AppError::NotFound(format!("Product not found: {msg}")),
            LedgerError::UnsupportedUnit(_) => AppError::BusinessRule(err.to_string()),
            LedgerError::InvalidQuantity(_)
            | LedgerError::InvalidAmount(_)
            | LedgerError::Validation(_) => AppError::Validation(err.to_string()),
            LedgerError::Calculation(_) => AppError::BusinessRule(err.to_string()),
            LedgerError::InsufficientStock { .. } => AppError::BusinessRule(err.to_string()),
            LedgerError::Conflict(_) => AppError::Conflict(err.to_string()),
            LedgerError::Database(msg) => AppError::Database(msg),
        }
    }
}
