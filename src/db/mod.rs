use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub mod station_queries;
pub mod station_repository;

pub use station_repository::{PgStationRepository, StationRepository};

// Each planning request issues a single spatial query, so a pool of one
// connection per expected in-flight request is plenty. The acquire timeout
// stays well under the upstream routing timeout so a saturated pool fails
// the request before the client gives up.
const POOL_MAX_CONNECTIONS: u32 = 16;
const POOL_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(POOL_MAX_CONNECTIONS)
        .acquire_timeout(POOL_ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}
