//! Cash Movement Model

use serde::{Deserialize, Serialize};

use crate::types::{CashDirection, MovementKind, PaymentMethod};

/// Immutable cash-ledger entry. `kind = sale` entries are created as a side
/// effect of a sale and carry `sale_id`; `kind = manual` entries are entered
/// directly and carry a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashMovement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub shop_id: String,
    pub kind: MovementKind,
    pub direction: CashDirection,
    pub method: PaymentMethod,
    /// Expense/income classification, manual movements only. Normalized to
    /// trimmed lowercase.
    pub category: Option<String>,
    pub amount_cents: i64,
    pub note: Option<String>,
    /// Business date of the movement; defaults to creation time
    pub occurred_at: i64,
    pub created_at: i64,
    pub created_by: String,
    /// Back-reference for sale-kind movements
    pub sale_id: Option<String>,
}

/// Create payload for a manual movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashMovementCreate {
    pub direction: CashDirection,
    pub method: PaymentMethod,
    pub category: String,
    pub amount_cents: i64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub occurred_at: Option<i64>,
}

/// Result of recording a manual movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementReceipt {
    pub movement_id: String,
}
