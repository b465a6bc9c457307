//! Cash Shift API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shops/{shop_id}/cash/shifts", shift_routes())
}

fn shift_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::open))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/close", post(handler::close))
}
