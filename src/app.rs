use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/points", get(handlers::points))
        .route("/api/redeemed", get(handlers::redeemed))
        .with_state(state)
}
