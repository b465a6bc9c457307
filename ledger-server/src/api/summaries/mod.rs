//! Summary API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shops/{shop_id}/summaries", summary_routes())
}

fn summary_routes() -> Router<ServerState> {
    Router::new()
        .route("/daily", get(handler::daily_range))
        .route("/daily/{day}", get(handler::daily))
        .route("/monthly/{month}", get(handler::monthly))
}
