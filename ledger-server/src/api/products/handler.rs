//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{ProductCreate, ProductUpdate, ProductView};
use shared::types::ProductUnit;

use crate::core::ServerState;
use crate::db::repository::ProductRepository;
use crate::db::repository::product::ProductFilter;
use crate::utils::validation::{MAX_NAME_LEN, validate_quantity, validate_required_text};
use crate::utils::{AppError, AppResult};

fn validate_price(price: i64) -> AppResult<()> {
    if price < 0 {
        return Err(AppError::validation(format!(
            "sale_price_cents must be non-negative, got {price}"
        )));
    }
    Ok(())
}

/// Query params for listing products
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive name substring
    pub name: Option<String>,
    pub unit: Option<ProductUnit>,
    pub low_stock: Option<bool>,
}

/// GET /api/shops/{shop_id}/products - list with optional filters
pub async fn list(
    State(state): State<ServerState>,
    Path(shop_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ProductView>>> {
    let repo = ProductRepository::new(state.db());
    let filter = ProductFilter {
        name: query.name,
        unit: query.unit,
        low_stock: query.low_stock,
    };
    let products = repo.list(&shop_id, &filter).await?;
    Ok(Json(products.into_iter().map(ProductView::from).collect()))
}

/// GET /api/shops/{shop_id}/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((shop_id, id)): Path<(String, String)>,
) -> AppResult<Json<ProductView>> {
    let repo = ProductRepository::new(state.db());
    let product = repo
        .find_by_id(&shop_id, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;
    Ok(Json(ProductView::from(product)))
}

/// POST /api/shops/{shop_id}/products
pub async fn create(
    State(state): State<ServerState>,
    Path(shop_id): Path<String>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ProductView>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_price(payload.sale_price_cents)?;
    if let Some(stock) = payload.stock_qty {
        validate_quantity(stock, "stock_qty")?;
    }
    if let Some(alert) = payload.low_stock_alert_qty {
        validate_quantity(alert, "low_stock_alert_qty")?;
    }

    let repo = ProductRepository::new(state.db());
    let product = repo.create(&shop_id, payload).await?;
    Ok(Json(ProductView::from(product)))
}

/// PUT /api/shops/{shop_id}/products/{id} - partial patch
pub async fn update(
    State(state): State<ServerState>,
    Path((shop_id, id)): Path<(String, String)>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ProductView>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.sale_price_cents {
        validate_price(price)?;
    }
    if let Some(stock) = payload.stock_qty {
        validate_quantity(stock, "stock_qty")?;
    }
    if let Some(alert) = payload.low_stock_alert_qty {
        validate_quantity(alert, "low_stock_alert_qty")?;
    }

    let repo = ProductRepository::new(state.db());
    let product = repo.update(&shop_id, &id, payload).await?;
    Ok(Json(ProductView::from(product)))
}

/// DELETE /api/shops/{shop_id}/products/{id} - hard delete
pub async fn delete(
    State(state): State<ServerState>,
    Path((shop_id, id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    let repo = ProductRepository::new(state.db());
    repo.delete(&shop_id, &id).await?;
    Ok(Json(true))
}
