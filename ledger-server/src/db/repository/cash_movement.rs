//! Cash Movement Repository
//!
//! Read side only. Movements are appended by the ledger engine (sale-kind as
//! a side effect of a sale, manual-kind through record_cash_movement) and
//! are immutable afterwards.

use shared::models::CashMovement;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};

const MOVEMENT_TABLE: &str = "cash_movement";

#[derive(Clone)]
pub struct CashMovementRepository {
    base: BaseRepository,
}

impl CashMovementRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, shop_id: &str, id: &str) -> RepoResult<Option<CashMovement>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT *, record::id(id) AS id FROM type::thing($tb, $key) WHERE shop_id = $shop",
            )
            .bind(("tb", MOVEMENT_TABLE))
            .bind(("key", id.to_string()))
            .bind(("shop", shop_id.to_string()))
            .await?;
        let movements: Vec<CashMovement> = result.take(0)?;
        Ok(movements.into_iter().next())
    }

    /// Recent movements by business date, newest first
    pub async fn list_recent(&self, shop_id: &str, limit: i64) -> RepoResult<Vec<CashMovement>> {
        let movements: Vec<CashMovement> = self
            .base
            .db()
            .query(
                "SELECT *, record::id(id) AS id FROM cash_movement WHERE shop_id = $shop \
                 ORDER BY occurred_at DESC LIMIT $limit",
            )
            .bind(("shop", shop_id.to_string()))
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(movements)
    }

    /// Movements within `[from, to)` Unix millis of business date
    pub async fn list_range(
        &self,
        shop_id: &str,
        from: i64,
        to: i64,
    ) -> RepoResult<Vec<CashMovement>> {
        let movements: Vec<CashMovement> = self
            .base
            .db()
            .query(
                "SELECT *, record::id(id) AS id FROM cash_movement WHERE shop_id = $shop \
                 AND occurred_at >= $from AND occurred_at < $to ORDER BY occurred_at DESC",
            )
            .bind(("shop", shop_id.to_string()))
            .bind(("from", from))
            .bind(("to", to))
            .await?
            .take(0)?;
        Ok(movements)
    }
}
