//! Shop Settings API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::{ShopSettings, ShopSettingsUpdate};

use crate::core::ServerState;
use crate::db::repository::ShopSettingsRepository;
use crate::utils::AppResult;
use crate::utils::time::parse_timezone;

/// GET /api/shops/{shop_id}/settings
pub async fn get(
    State(state): State<ServerState>,
    Path(shop_id): Path<String>,
) -> AppResult<Json<Option<ShopSettings>>> {
    let repo = ShopSettingsRepository::new(state.db());
    Ok(Json(repo.get(&shop_id).await?))
}

/// PUT /api/shops/{shop_id}/settings
pub async fn put(
    State(state): State<ServerState>,
    Path(shop_id): Path<String>,
    Json(payload): Json<ShopSettingsUpdate>,
) -> AppResult<Json<ShopSettings>> {
    // Reject unknown zones before they poison period-key computation
    parse_timezone(&payload.timezone)?;

    let repo = ShopSettingsRepository::new(state.db());
    let settings = repo.upsert(&shop_id, &payload.timezone).await?;
    Ok(Json(settings))
}
