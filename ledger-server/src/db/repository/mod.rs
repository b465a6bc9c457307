//! Repository Module
//!
//! CRUD and query operations over the SurrealDB tables. Repositories read
//! documents through a `record::id(id) AS id` projection so entity ids reach
//! the models as plain strings, and write through explicitly keyed
//! `type::thing(...)` targets.

pub mod cash_movement;
pub mod product;
pub mod sale;
pub mod shift;
pub mod shop_settings;
pub mod summary;

// Re-exports
pub use cash_movement::CashMovementRepository;
pub use product::ProductRepository;
pub use sale::SaleRepository;
pub use shift::ShiftRepository;
pub use shop_settings::ShopSettingsRepository;
pub use summary::SummaryRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::InvalidState(msg) => AppError::BusinessRule(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository holding the database handle
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Generate a fresh record key
pub fn new_key() -> String {
    uuid::Uuid::new_v4().to_string()
}
