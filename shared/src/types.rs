//! Domain vocabularies
//!
//! Closed enums shared by the ledger, the cash register and the API layer.
//! Wire representation is lowercase to stay compatible with the stored
//! document format.

use serde::{Deserialize, Serialize};

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Accepted payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Debit,
    Credit,
    /// Mercado Pago
    Mp,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Transfer,
        PaymentMethod::Debit,
        PaymentMethod::Credit,
        PaymentMethod::Mp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Debit => "debit",
            PaymentMethod::Credit => "credit",
            PaymentMethod::Mp => "mp",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a cash movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashDirection {
    In,
    Out,
}

impl CashDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CashDirection::In => "in",
            CashDirection::Out => "out",
        }
    }

    /// Sign applied to `cash_net_cents` and the category breakdown
    pub fn signum(&self) -> i64 {
        match self {
            CashDirection::In => 1,
            CashDirection::Out => -1,
        }
    }
}

impl std::fmt::Display for CashDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin of a cash movement: created by the sale path or entered manually
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Sale,
    Manual,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Sale => "sale",
            MovementKind::Manual => "manual",
        }
    }
}

/// Product sale unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductUnit {
    /// Sold by weight; quantities carry 3 decimal places
    Kg,
    /// Sold by piece
    Unit,
}

impl ProductUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductUnit::Kg => "kg",
            ProductUnit::Unit => "unit",
        }
    }
}

/// Shift status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    Open,
    Closed,
}

impl Default for ShiftStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl ShiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Open => "open",
            ShiftStatus::Closed => "closed",
        }
    }
}
