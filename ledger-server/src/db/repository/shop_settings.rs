//! Shop Settings Repository
//!
//! Singleton-per-shop configuration record, keyed by the shop id itself.

use shared::models::ShopSettings;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};

const SETTINGS_TABLE: &str = "shop_settings";

#[derive(Clone)]
pub struct ShopSettingsRepository {
    base: BaseRepository,
}

impl ShopSettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn get(&self, shop_id: &str) -> RepoResult<Option<ShopSettings>> {
        let mut result = self
            .base
            .db()
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $key)")
            .bind(("tb", SETTINGS_TABLE))
            .bind(("key", shop_id.to_string()))
            .await?;
        let settings: Vec<ShopSettings> = result.take(0)?;
        Ok(settings.into_iter().next())
    }

    /// Create or update the settings record for a shop
    pub async fn upsert(&self, shop_id: &str, timezone: &str) -> RepoResult<ShopSettings> {
        let now = shared::util::now_millis();

        self.base
            .db()
            .query(
                "UPSERT type::thing($tb, $key) SET \
                     shop_id = $shop, \
                     timezone = $timezone, \
                     created_at = created_at ?? $now, \
                     updated_at = $now \
                 RETURN NONE",
            )
            .bind(("tb", SETTINGS_TABLE))
            .bind(("key", shop_id.to_string()))
            .bind(("shop", shop_id.to_string()))
            .bind(("timezone", timezone.to_string()))
            .bind(("now", now))
            .await?
            .check()?;

        self.get(shop_id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to persist shop settings".to_string()))
    }
}
