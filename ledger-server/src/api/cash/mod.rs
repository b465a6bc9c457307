//! Cash Movement API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shops/{shop_id}/cash/movements", movement_routes())
}

fn movement_routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list).post(handler::create))
}
