pub mod debug;
pub mod plan;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/route/",
            get(plan::plan_route_get).post(plan::plan_route_post),
        )
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
