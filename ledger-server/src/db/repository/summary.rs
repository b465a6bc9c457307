//! Aggregate Summary Repository
//!
//! Read side only: summaries are mutated exclusively through the increment
//! statements the ledger engine co-commits with each sale or movement.
//! Record keys are `{shop_id}:{period}` so a summary is addressable without
//! a query.

use shared::models::PeriodSummary;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};

pub const DAILY_TABLE: &str = "daily_summary";
pub const MONTHLY_TABLE: &str = "monthly_summary";

/// Record key for a summary document
pub fn summary_key(shop_id: &str, period: &str) -> String {
    format!("{shop_id}:{period}")
}

#[derive(Clone)]
pub struct SummaryRepository {
    base: BaseRepository,
}

impl SummaryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn find(&self, table: &'static str, key: String) -> RepoResult<Option<PeriodSummary>> {
        let mut result = self
            .base
            .db()
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $key)")
            .bind(("tb", table))
            .bind(("key", key))
            .await?;
        let summaries: Vec<PeriodSummary> = result.take(0)?;
        Ok(summaries.into_iter().next())
    }

    /// Daily summary for `day` (YYYY-MM-DD), `None` when no data exists yet
    pub async fn daily(&self, shop_id: &str, day: &str) -> RepoResult<Option<PeriodSummary>> {
        self.find(DAILY_TABLE, summary_key(shop_id, day)).await
    }

    /// Monthly summary for `month` (YYYY-MM)
    pub async fn monthly(&self, shop_id: &str, month: &str) -> RepoResult<Option<PeriodSummary>> {
        self.find(MONTHLY_TABLE, summary_key(shop_id, month)).await
    }

    /// Daily summaries with `from <= period <= to`, ascending (dashboard
    /// series)
    pub async fn daily_range(
        &self,
        shop_id: &str,
        from: &str,
        to: &str,
    ) -> RepoResult<Vec<PeriodSummary>> {
        let summaries: Vec<PeriodSummary> = self
            .base
            .db()
            .query(
                "SELECT *, record::id(id) AS id FROM daily_summary WHERE shop_id = $shop \
                 AND period >= $from AND period <= $to ORDER BY period ASC",
            )
            .bind(("shop", shop_id.to_string()))
            .bind(("from", from.to_string()))
            .bind(("to", to.to_string()))
            .await?
            .take(0)?;
        Ok(summaries)
    }
}
