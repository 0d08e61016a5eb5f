use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Map, Value};
use sqlx::PgPool;
use std::sync::Arc;

/// GET /debug/health - liveness probe over the store, the PostGIS
/// extension, the station inventory, and the route cache.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut checks = Map::new();
    let mut healthy = true;

    checks.insert(
        "database".to_string(),
        probe(&state.db_pool, "SELECT 1", &mut healthy).await,
    );
    checks.insert(
        "postgis".to_string(),
        probe(&state.db_pool, "SELECT PostGIS_Version()", &mut healthy).await,
    );

    let stations = match crate::db::station_queries::count_stations(&state.db_pool).await {
        Ok(count) => json!(count),
        Err(e) => json!({ "error": e.to_string() }),
    };
    checks.insert("stations".to_string(), stations);

    let stats = state.planner.cache_stats();
    checks.insert(
        "route_cache".to_string(),
        json!({
            "hits": stats.hits,
            "misses": stats.misses,
            "hit_rate": format!("{:.1}%", stats.hit_rate),
        }),
    );

    Json(json!({
        "status": if healthy { "ok" } else { "degraded" },
        "checks": checks,
    }))
}

async fn probe(pool: &PgPool, query: &str, healthy: &mut bool) -> Value {
    match sqlx::query(query).fetch_one(pool).await {
        Ok(_) => json!("ok"),
        Err(e) => {
            *healthy = false;
            json!({ "error": e.to_string() })
        }
    }
}
