use crate::error::{AppError, Result};
use crate::models::{PlanRequest, PlanResult};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

/// GET /route/ - plan a fuel-optimized route from query-string fields.
pub async fn plan_route_get(
    State(state): State<Arc<AppState>>,
    Query(request): Query<PlanRequest>,
) -> Result<Json<PlanResult>> {
    handle(state, request).await
}

/// POST /route/ - same contract, fields in a JSON body.
pub async fn plan_route_post(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanResult>> {
    handle(state, request).await
}

async fn handle(state: Arc<AppState>, request: PlanRequest) -> Result<Json<PlanResult>> {
    let (start, end) = request.validate().map_err(AppError::InvalidInput)?;

    tracing::info!(start, end, "plan request");

    let result = state.planner.plan(start, end).await?;

    Ok(Json(result))
}
