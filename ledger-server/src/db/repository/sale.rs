//! Sale Repository
//!
//! Read side only. Sales are written exclusively by the ledger engine's
//! transaction; nothing else may create, update or delete them.

use shared::models::Sale;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};

const SALE_TABLE: &str = "sale";

#[derive(Clone)]
pub struct SaleRepository {
    base: BaseRepository,
}

impl SaleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, shop_id: &str, id: &str) -> RepoResult<Option<Sale>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT *, record::id(id) AS id FROM type::thing($tb, $key) WHERE shop_id = $shop",
            )
            .bind(("tb", SALE_TABLE))
            .bind(("key", id.to_string()))
            .bind(("shop", shop_id.to_string()))
            .await?;
        let sales: Vec<Sale> = result.take(0)?;
        Ok(sales.into_iter().next())
    }

    /// Recent sales, newest first
    pub async fn list_recent(&self, shop_id: &str, limit: i64) -> RepoResult<Vec<Sale>> {
        let sales: Vec<Sale> = self
            .base
            .db()
            .query(
                "SELECT *, record::id(id) AS id FROM sale WHERE shop_id = $shop \
                 ORDER BY created_at DESC LIMIT $limit",
            )
            .bind(("shop", shop_id.to_string()))
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(sales)
    }

    /// Sales within `[from, to)` Unix millis, newest first
    pub async fn list_range(&self, shop_id: &str, from: i64, to: i64) -> RepoResult<Vec<Sale>> {
        let sales: Vec<Sale> = self
            .base
            .db()
            .query(
                "SELECT *, record::id(id) AS id FROM sale WHERE shop_id = $shop \
                 AND created_at >= $from AND created_at < $to ORDER BY created_at DESC",
            )
            .bind(("shop", shop_id.to_string()))
            .bind(("from", from))
            .bind(("to", to))
            .await?
            .take(0)?;
        Ok(sales)
    }
}
