//! Cash Movement API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;

use shared::models::{CashMovement, CashMovementCreate, MovementReceipt};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::CashMovementRepository;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

/// Query params for listing movements
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

/// POST /api/shops/{shop_id}/cash/movements - record a manual movement
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(shop_id): Path<String>,
    Json(payload): Json<CashMovementCreate>,
) -> AppResult<Json<MovementReceipt>> {
    validate_required_text(&payload.category, "category", MAX_NAME_LEN)?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let receipt = state
        .ledger
        .record_cash_movement(&shop_id, &current_user.id, payload)
        .await?;
    Ok(Json(receipt))
}

/// GET /api/shops/{shop_id}/cash/movements - recent movements
pub async fn list(
    State(state): State<ServerState>,
    Path(shop_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<CashMovement>>> {
    let repo = CashMovementRepository::new(state.db());
    let movements = repo.list_recent(&shop_id, query.limit).await?;
    Ok(Json(movements))
}
