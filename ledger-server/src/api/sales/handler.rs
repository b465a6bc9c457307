//! Sales API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;

use shared::models::{Sale, SaleReceipt, SaleRequest};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::SaleRepository;
use crate::utils::time;
use crate::utils::{AppError, AppResult};

/// Query params for listing sales
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn default_limit() -> i64 {
    50
}

/// POST /api/shops/{shop_id}/sales - record a sale
///
/// All business preconditions live in the ledger engine; this handler only
/// attaches the caller identity and dispatches.
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(shop_id): Path<String>,
    Json(payload): Json<SaleRequest>,
) -> AppResult<Json<SaleReceipt>> {
    let receipt = state
        .ledger
        .record_sale(
            &shop_id,
            &current_user.id,
            payload.payment_method,
            &payload.items,
        )
        .await?;
    Ok(Json(receipt))
}

/// GET /api/shops/{shop_id}/sales - recent sales or a date range
pub async fn list(
    State(state): State<ServerState>,
    Path(shop_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Sale>>> {
    let repo = SaleRepository::new(state.db());

    let sales = if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        let tz = state.ledger.shop_timezone(&shop_id).await?;
        let start_date = time::parse_date(&start)?;
        let end_date = time::parse_date(&end)?;
        repo.list_range(
            &shop_id,
            time::day_start_millis(start_date, tz),
            time::day_end_millis(end_date, tz),
        )
        .await?
    } else {
        repo.list_recent(&shop_id, query.limit).await?
    };

    Ok(Json(sales))
}

/// GET /api/shops/{shop_id}/sales/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((shop_id, id)): Path<(String, String)>,
) -> AppResult<Json<Sale>> {
    let repo = SaleRepository::new(state.db());
    let sale = repo
        .find_by_id(&shop_id, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Sale {id} not found")))?;
    Ok(Json(sale))
}
