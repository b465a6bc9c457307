//! Summary API Handlers
//!
//! Pure readers over the aggregate documents the ledger engine maintains.
//! A period with no data returns `null`, not an error.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::PeriodSummary;

use crate::core::ServerState;
use crate::db::repository::SummaryRepository;
use crate::utils::AppResult;
use crate::utils::time::{parse_date, parse_month};

/// Query params for the daily range (dashboard series)
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub from: String,
    pub to: String,
}

/// GET /api/shops/{shop_id}/summaries/daily/{day}
pub async fn daily(
    State(state): State<ServerState>,
    Path((shop_id, day)): Path<(String, String)>,
) -> AppResult<Json<Option<PeriodSummary>>> {
    parse_date(&day)?;
    let repo = SummaryRepository::new(state.db());
    Ok(Json(repo.daily(&shop_id, &day).await?))
}

/// GET /api/shops/{shop_id}/summaries/monthly/{month}
pub async fn monthly(
    State(state): State<ServerState>,
    Path((shop_id, month)): Path<(String, String)>,
) -> AppResult<Json<Option<PeriodSummary>>> {
    parse_month(&month)?;
    let repo = SummaryRepository::new(state.db());
    Ok(Json(repo.monthly(&shop_id, &month).await?))
}

/// GET /api/shops/{shop_id}/summaries/daily?from=YYYY-MM-DD&to=YYYY-MM-DD
pub async fn daily_range(
    State(state): State<ServerState>,
    Path(shop_id): Path<String>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<PeriodSummary>>> {
    parse_date(&query.from)?;
    parse_date(&query.to)?;
    let repo = SummaryRepository::new(state.db());
    Ok(Json(
        repo.daily_range(&shop_id, &query.from, &query.to).await?,
    ))
}
