//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`products`] - product/stock CRUD
//! - [`sales`] - sale recording and listing
//! - [`cash`] - manual cash movements
//! - [`shifts`] - cashier shift open/close
//! - [`summaries`] - daily/monthly aggregate reads
//! - [`settings`] - per-shop configuration
//!
//! Everything under `/api/shops/{shop_id}/…` requires the forwarded caller
//! identity; the health endpoint stays open.

pub mod cash;
pub mod health;
pub mod products;
pub mod sales;
pub mod settings;
pub mod shifts;
pub mod summaries;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_identity;
use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    let shop_api = Router::new()
        .merge(products::router())
        .merge(sales::router())
        .merge(cash::router())
        .merge(shifts::router())
        .merge(summaries::router())
        .merge(settings::router())
        .layer(middleware::from_fn(require_identity));

    Router::new()
        .merge(health::router())
        .merge(shop_api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
