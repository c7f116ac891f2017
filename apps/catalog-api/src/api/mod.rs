//! API routes, nested under `/api` by `axum_helpers::create_router`.

pub mod catalog;
pub mod health;

use axum::Router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(catalog::router(state))
        .merge(health::router(state.clone()))
        .merge(axum_helpers::health_router())
}
