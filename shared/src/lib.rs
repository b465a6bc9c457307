//! Shared types for the Mostrador POS back end
//!
//! Pure domain types and codecs used by the ledger server (and any future
//! client crate): model structs, payment/direction vocabularies, and the
//! money & quantity codec. No I/O lives here.

pub mod models;
pub mod money;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
pub use types::{CashDirection, MovementKind, PaymentMethod, ProductUnit, ShiftStatus, Timestamp};
