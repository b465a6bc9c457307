//! Shared test scaffolding: in-memory server state and seed helpers
#![allow(dead_code)]

use ledger_server::db::repository::ProductRepository;
use ledger_server::{Config, ServerState};
use shared::models::{Product, ProductCreate};
use shared::types::ProductUnit;

pub const SHOP: &str = "shop-test";
pub const USER: &str = "user-1";

/// Fresh state backed by an in-memory database
pub async fn test_state() -> ServerState {
    let config = Config::with_overrides("/tmp/mostrador-test", 0);
    ServerState::in_memory(config)
        .await
        .expect("in-memory state")
}

/// Seed a weight-based product
pub async fn seed_product(
    state: &ServerState,
    name: &str,
    price_cents: i64,
    stock: f64,
) -> Product {
    seed_product_in(state, SHOP, name, price_cents, stock).await
}

pub async fn seed_product_in(
    state: &ServerState,
    shop_id: &str,
    name: &str,
    price_cents: i64,
    stock: f64,
) -> Product {
    let repo = ProductRepository::new(state.db());
    repo.create(
        shop_id,
        ProductCreate {
            name: name.to_string(),
            unit: ProductUnit::Kg,
            sale_price_cents: price_cents,
            stock_qty: Some(stock),
            low_stock_alert_qty: Some(0.0),
        },
    )
    .await
    .expect("seed product")
}

/// Current stock of a product, read back from the store
pub async fn stock_of(state: &ServerState, id: &str) -> f64 {
    let repo = ProductRepository::new(state.db());
    repo.find_by_id(SHOP, id)
        .await
        .expect("read product")
        .expect("product exists")
        .stock_qty
}
