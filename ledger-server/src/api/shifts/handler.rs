//! Cash Shift API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;

use shared::models::{CashShift, ShiftClose, ShiftOpen};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::ShiftRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_cash_count, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Query params for listing shifts
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

/// GET /api/shops/{shop_id}/cash/shifts - recent shifts
pub async fn list(
    State(state): State<ServerState>,
    Path(shop_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<CashShift>>> {
    let repo = ShiftRepository::new(state.db());
    let shifts = repo.list(&shop_id, query.limit).await?;
    Ok(Json(shifts))
}

/// GET /api/shops/{shop_id}/cash/shifts/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((shop_id, id)): Path<(String, String)>,
) -> AppResult<Json<CashShift>> {
    let repo = ShiftRepository::new(state.db());
    let shift = repo
        .find_by_id(&shop_id, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Shift {id} not found")))?;
    Ok(Json(shift))
}

/// POST /api/shops/{shop_id}/cash/shifts - open a shift
pub async fn open(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(shop_id): Path<String>,
    Json(payload): Json<ShiftOpen>,
) -> AppResult<Json<CashShift>> {
    validate_required_text(&payload.cashier_name, "cashier_name", MAX_NAME_LEN)?;
    validate_cash_count(payload.opening_cash_cents, "opening_cash_cents")?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let repo = ShiftRepository::new(state.db());
    let shift = repo.open(&shop_id, &current_user.id, payload).await?;
    Ok(Json(shift))
}

/// POST /api/shops/{shop_id}/cash/shifts/{id}/close - close and settle
///
/// The difference is recomputed server-side; the payload carries only the
/// counted closing cash.
pub async fn close(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((shop_id, id)): Path<(String, String)>,
    Json(payload): Json<ShiftClose>,
) -> AppResult<Json<CashShift>> {
    validate_cash_count(payload.closing_cash_cents, "closing_cash_cents")?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let repo = ShiftRepository::new(state.db());
    let shift = repo
        .close(&shop_id, &id, &current_user.id, payload)
        .await?;
    Ok(Json(shift))
}
