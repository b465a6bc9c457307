//! Shop Settings Model

use serde::{Deserialize, Serialize};

/// Per-shop configuration (singleton per tenant, keyed by shop id).
///
/// The timezone drives daily/monthly summary key boundaries; shops without a
/// settings record fall back to the server-wide default zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub shop_id: String,
    /// IANA zone name, e.g. "America/Argentina/Buenos_Aires"
    pub timezone: String,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

/// Update settings payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSettingsUpdate {
    pub timezone: String,
}
