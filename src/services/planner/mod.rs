pub mod dag;
pub mod nodes;

pub use dag::{optimize, PathOutcome};
pub use nodes::{build_nodes, prefilter_stations};

use crate::cache::CacheStats;
use crate::constants::{PREFILTER_SEGMENT_MI, VEHICLE_MPG, VEHICLE_RANGE_MI};
use crate::db::StationRepository;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, PlanResult, RouteFeature, RouteNode};
use crate::services::geocoder::{parse_coordinate_pair, NominatimClient};
use crate::services::ors::OrsClient;
use std::sync::Arc;

/// Orchestrates one planning request end to end:
/// geocode -> route -> select -> build -> prefilter -> optimize -> assemble.
///
/// Holds the process-wide upstream clients and the station repository;
/// everything else is request-scoped.
pub struct RoutePlanner {
    geocoder: NominatimClient,
    ors: OrsClient,
    stations: Arc<dyn StationRepository>,
}

impl RoutePlanner {
    pub fn new(
        geocoder: NominatimClient,
        ors: OrsClient,
        stations: Arc<dyn StationRepository>,
    ) -> Self {
        RoutePlanner {
            geocoder,
            ors,
            stations,
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.ors.cache_stats()
    }

    /// Resolve a location string to coordinates.
    ///
    /// A parsable decimal pair never reaches the upstream geocoder: in
    /// bounds it resolves directly, out of bounds it is rejected as invalid
    /// input. Anything else goes to the forward geocoder, whose "no result"
    /// (including swallowed transport failures) becomes a resolution error.
    async fn resolve(&self, place: &str, which: &str) -> Result<Coordinates> {
        let trimmed = place.trim();
        if trimmed.is_empty() {
            return Err(AppError::Resolution(format!(
                "Could not resolve {} location.",
                which
            )));
        }

        if let Some((lat, lon)) = parse_coordinate_pair(trimmed) {
            return Coordinates::new(lat, lon).map_err(AppError::InvalidInput);
        }

        match self.geocoder.search(trimmed).await {
            Some(coords) => Ok(coords),
            None => Err(AppError::Resolution(format!(
                "Could not resolve {} location.",
                which
            ))),
        }
    }

    pub async fn plan(&self, start: &str, end: &str) -> Result<PlanResult> {
        let start_ll = self.resolve(start, "start").await?;
        let end_ll = self.resolve(end, "end").await?;

        let geometry = self.ors.route(&start_ll, &end_ll).await?;
        let total_miles = geometry.total_miles;

        let rows = self.stations.stations_on_route(&geometry.polyline).await?;
        tracing::debug!(candidates = rows.len(), "stations within route buffer");

        let station_nodes = build_nodes(&rows, total_miles);
        let station_nodes = prefilter_stations(station_nodes, PREFILTER_SEGMENT_MI);

        let mut all_nodes = Vec::with_capacity(station_nodes.len() + 2);
        all_nodes.push(RouteNode::start(start_ll));
        all_nodes.extend(station_nodes);
        all_nodes.push(RouteNode::finish(total_miles, end_ll));

        let outcome = optimize(&all_nodes, VEHICLE_RANGE_MI, VEHICLE_MPG).ok_or_else(|| {
            AppError::Infeasible(
                "No feasible refuel path (a segment longer than 500 miles has no station)."
                    .to_string(),
            )
        })?;

        tracing::info!(
            total_miles,
            stops = outcome.stops.len(),
            total_cost = %outcome.total_cost,
            "route planned"
        );

        Ok(PlanResult {
            route_geojson: RouteFeature::line_string(&geometry.polyline),
            stops: outcome.stops,
            total_fuel_cost: outcome.total_cost,
            total_gallons: outcome.total_gallons,
            total_miles,
            mpg_used: VEHICLE_MPG,
        })
    }
}
