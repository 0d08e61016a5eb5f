use crate::constants::{DEGREES_PER_MILE, STATION_BUFFER_MI};
use crate::error::Result;
use crate::models::{Coordinates, StationOnRoute};
use async_trait::async_trait;

/// Read access to the station store during planning. The selector returns
/// rows ordered by their fractional position along the route; mileage is the
/// node builder's business.
#[async_trait]
pub trait StationRepository: Send + Sync {
    async fn stations_on_route(&self, polyline: &[Coordinates]) -> Result<Vec<StationOnRoute>>;
}

pub struct PgStationRepository {
    pool: sqlx::PgPool,
}

impl PgStationRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}

#[async_trait]
impl StationRepository for PgStationRepository {
    async fn stations_on_route(&self, polyline: &[Coordinates]) -> Result<Vec<StationOnRoute>> {
        let buffer_degrees = STATION_BUFFER_MI * DEGREES_PER_MILE;
        Ok(
            super::station_queries::stations_within_buffer(&self.pool, polyline, buffer_degrees)
                .await?,
        )
    }
}
