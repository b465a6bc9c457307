//! Aggregate Summary Model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// String-keyed cents accumulator for per-method and per-category breakdowns.
///
/// Keys spring into existence on first increment; merging two maps adds
/// values key-wise, so increments are commutative and associative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CentsByKey(pub BTreeMap<String, i64>);

impl CentsByKey {
    pub fn get(&self, key: &str) -> i64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, key: &str, delta: i64) {
        *self.0.entry(key.to_string()).or_insert(0) += delta;
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &i64)> {
        self.0.iter()
    }
}

/// Per-day or per-month aggregate document, keyed `{shop_id}:{period}` where
/// period is `YYYY-MM-DD` (daily) or `YYYY-MM` (monthly) in the shop's
/// business timezone.
///
/// Derived but exact: maintained solely by increments co-committed with the
/// originating ledger write, never recomputed by scanning raw records. At any
/// quiescent point `sales_total_cents` equals the sum over the period's
/// sales, and `cash_net_cents` the signed sum over its cash movements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub shop_id: String,
    pub period: String,

    // Sales view
    #[serde(default)]
    pub sales_count: i64,
    #[serde(default)]
    pub sales_total_cents: i64,
    #[serde(default)]
    pub sales_by_method: CentsByKey,

    // Cash view: unsigned directional totals plus the signed net
    #[serde(default)]
    pub cash_in_cents: i64,
    #[serde(default)]
    pub cash_out_cents: i64,
    #[serde(default)]
    pub cash_net_cents: i64,
    #[serde(default)]
    pub cash_in_by_method: CentsByKey,
    #[serde(default)]
    pub cash_out_by_method: CentsByKey,
    /// Signed, manual movements only
    #[serde(default)]
    pub cash_by_category: CentsByKey,

    pub updated_at: Option<i64>,
}
