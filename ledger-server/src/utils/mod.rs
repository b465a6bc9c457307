//! Utility module — common helpers and types
//!
//! - [`AppError`] / [`AppResponse`] — error taxonomy and response envelope
//! - [`time`] — business-timezone period keys and date bounds
//! - [`validation`] — field validators used by handlers
//! - [`logger`] — tracing setup

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResponse, ok};

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;
