//! Product Model

use serde::{Deserialize, Serialize};

use crate::types::ProductUnit;

/// Product entity, owned by exactly one shop.
///
/// `stock_qty` is the only field the ledger engine mutates; everything else
/// changes through explicit edits. Sales keep their own name/price snapshot,
/// so deleting a product never touches history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub shop_id: String,
    pub name: String,
    pub unit: ProductUnit,
    /// Sale price per kg (or per piece) in cents
    pub sale_price_cents: i64,
    /// Current stock; decimal when unit is kg
    pub stock_qty: f64,
    pub low_stock_alert_qty: f64,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Product {
    /// Derived low-stock predicate, computed at read time and never stored.
    pub fn is_low_stock(&self) -> bool {
        self.stock_qty <= self.low_stock_alert_qty
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub unit: ProductUnit,
    pub sale_price_cents: i64,
    #[serde(default)]
    pub stock_qty: Option<f64>,
    #[serde(default)]
    pub low_stock_alert_qty: Option<f64>,
}

/// Update product payload (partial patch)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub unit: Option<ProductUnit>,
    pub sale_price_cents: Option<i64>,
    pub stock_qty: Option<f64>,
    pub low_stock_alert_qty: Option<f64>,
}

/// Product read model with the derived low-stock flag attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub low_stock: bool,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let low_stock = product.is_low_stock();
        Self { product, low_stock }
    }
}
