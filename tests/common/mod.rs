use async_trait::async_trait;
use fuelroute::constants::METERS_TO_MILES;
use fuelroute::db::StationRepository;
use fuelroute::error::Result;
use fuelroute::models::{Coordinates, StationOnRoute};
use fuelroute::services::geocoder::NominatimClient;
use fuelroute::services::ors::OrsClient;
use fuelroute::services::planner::RoutePlanner;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::Arc;

/// In-memory station source for planner tests; returns a fixed row set.
#[allow(dead_code)]
pub struct StubStationRepository {
    rows: Vec<StationOnRoute>,
}

impl StubStationRepository {
    #[allow(dead_code)]
    pub fn new(rows: Vec<StationOnRoute>) -> Self {
        StubStationRepository { rows }
    }
}

#[async_trait]
impl StationRepository for StubStationRepository {
    async fn stations_on_route(&self, _polyline: &[Coordinates]) -> Result<Vec<StationOnRoute>> {
        Ok(self.rows.clone())
    }
}

/// A selector row at the given fractional position.
#[allow(dead_code)]
pub fn station(opis_id: i32, fraction: f64, price: &str) -> StationOnRoute {
    StationOnRoute {
        opis_id,
        name: format!("Station {}", opis_id),
        address: format!("{} Interstate Dr", opis_id),
        retail_price: price.parse::<Decimal>().unwrap(),
        lat: 36.0,
        lon: -98.0,
        fraction,
    }
}

#[allow(dead_code)]
pub fn miles_to_meters(miles: f64) -> f64 {
    miles / METERS_TO_MILES
}

/// A routing-provider response body: one feature, LineString geometry,
/// summary distance in meters.
#[allow(dead_code)]
pub fn ors_feature_collection(coordinates: &[[f64; 2]], distance_meters: f64) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            },
            "properties": {
                "summary": { "distance": distance_meters, "duration": 0.0 }
            }
        }]
    })
}

/// Planner wired to a mock routing endpoint, an (optionally mock) geocoder,
/// and a stubbed station set.
#[allow(dead_code)]
pub fn make_planner(
    ors_url: String,
    nominatim_url: Option<String>,
    rows: Vec<StationOnRoute>,
) -> RoutePlanner {
    // An unroutable port: tests that never geocode must never reach it
    let nominatim_url = nominatim_url.unwrap_or_else(|| "http://127.0.0.1:9".to_string());
    let geocoder = NominatimClient::with_config("fuelroute-tests", nominatim_url).unwrap();
    let ors = OrsClient::with_config("test-key".to_string(), ors_url, 3600).unwrap();
    RoutePlanner::new(geocoder, ors, Arc::new(StubStationRepository::new(rows)))
}
