//! Cash Shift Model

use serde::{Deserialize, Serialize};

use crate::types::ShiftStatus;

/// Cashier shift entity. Lifecycle is `open -> closed`, closed is terminal.
///
/// The shift register is an independent audit trail: it shares the payment
/// vocabulary with the ledger but never joins its transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashShift {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub shop_id: String,
    pub cashier_name: String,
    #[serde(default)]
    pub status: ShiftStatus,
    pub opening_cash_cents: i64,
    pub closing_cash_cents: Option<i64>,
    /// closing - opening, recomputed server-side at close
    pub difference_cents: Option<i64>,
    pub opened_at: i64,
    pub closed_at: Option<i64>,
    pub note: Option<String>,
    pub created_by: String,
    pub closed_by: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

/// Open shift payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftOpen {
    pub cashier_name: String,
    pub opening_cash_cents: i64,
    #[serde(default)]
    pub opened_at: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Close shift payload. The difference is never accepted from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftClose {
    pub closing_cash_cents: i64,
    #[serde(default)]
    pub closed_at: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
}
