//! Sale Model

use serde::{Deserialize, Serialize};

use crate::types::PaymentMethod;

/// One requested line of a sale, tagged by entry mode: the cashier either
/// types a weight and the total is derived, or types an amount and the
/// weight is derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SaleLine {
    Kg { product_id: String, qty_kg: f64 },
    Amount { product_id: String, amount_cents: i64 },
}

impl SaleLine {
    pub fn product_id(&self) -> &str {
        match self {
            SaleLine::Kg { product_id, .. } => product_id,
            SaleLine::Amount { product_id, .. } => product_id,
        }
    }
}

/// Request payload for recording a sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRequest {
    pub payment_method: PaymentMethod,
    pub items: Vec<SaleLine>,
}

/// Resolved line item, denormalized snapshot of the product at sale time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    pub product_id: String,
    pub product_name: String,
    pub qty_kg: f64,
    pub price_per_kg_cents: i64,
    pub total_cents: i64,
}

/// Sale entity. Immutable once created; written only by the ledger engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub shop_id: String,
    pub created_at: i64,
    pub created_by: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<SaleItem>,
    pub total_qty_kg: f64,
    pub total_cents: i64,
}

/// Result of a successful sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleReceipt {
    pub sale_id: String,
    pub total_cents: i64,
    pub total_qty_kg: f64,
    pub items: Vec<SaleItem>,
}
