use crate::cache::{route_fingerprint, CacheStats, RouteCache};
use crate::constants::{METERS_TO_MILES, ORS_ROUTE_URL, ORS_TIMEOUT_SECS, ROUTE_CACHE_MAX_ENTRIES};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, RouteGeometry};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenRouteService directions client with a read-through route cache.
///
/// One instance is built at startup and shared by every request; the reqwest
/// client keeps its keep-alive pool, the moka cache its TTL'd entries.
pub struct OrsClient {
    client: Client,
    api_key: String,
    route_url: String,
    cache: RouteCache,
}

impl OrsClient {
    pub fn new(api_key: String, cache_ttl_seconds: u64) -> Result<Self> {
        Self::with_config(api_key, ORS_ROUTE_URL.to_string(), cache_ttl_seconds)
    }

    pub fn with_config(api_key: String, route_url: String, cache_ttl_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(ORS_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build routing client: {}", e)))?;

        Ok(OrsClient {
            client,
            api_key,
            route_url,
            cache: RouteCache::new(cache_ttl_seconds, ROUTE_CACHE_MAX_ENTRIES),
        })
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Fetch the driving route between two points.
    ///
    /// Inputs are `(lat, lon)` coordinates; the wire format wants
    /// `[lon, lat]`, and the swap happens here at the provider boundary.
    pub async fn route(&self, start: &Coordinates, end: &Coordinates) -> Result<RouteGeometry> {
        let key = route_fingerprint(start, end);
        if let Some(geometry) = self.cache.get(&key).await {
            tracing::info!(total_miles = geometry.total_miles, "route cache hit");
            return Ok(geometry);
        }

        let body = OrsRouteRequest {
            coordinates: [[start.lon, start.lat], [end.lon, end.lat]],
        };

        let response = self
            .client
            .post(&self.route_url)
            .header(AUTHORIZATION, self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<OrsErrorResponse>()
                .await
                .ok()
                .and_then(|e| e.error.map(|err| err.message))
                .unwrap_or_else(|| "Route not found".to_string());
            return Err(AppError::Upstream(format!("HTTP {}: {}", status, message)));
        }

        let directions: OrsRouteResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse response: {}", e)))?;

        let feature = directions
            .features
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Upstream("No route returned".to_string()))?;

        let polyline: Vec<Coordinates> = feature
            .geometry
            .coordinates
            .iter()
            .filter_map(|c| Coordinates::new(c[1], c[0]).ok())
            .collect();
        if polyline.len() < 2 {
            return Err(AppError::Upstream("Malformed route geometry".to_string()));
        }

        let total_miles = feature.properties.summary.distance * METERS_TO_MILES;
        let geometry = RouteGeometry {
            polyline,
            total_miles,
        };

        self.cache.insert(key, geometry.clone()).await;
        tracing::info!(total_miles, "route cached");

        Ok(geometry)
    }
}

// ORS request/response wire types

#[derive(Debug, Serialize)]
struct OrsRouteRequest {
    /// `[lon, lat]` pairs, provider coordinate order
    coordinates: [[f64; 2]; 2],
}

#[derive(Debug, Deserialize)]
struct OrsRouteResponse {
    features: Vec<OrsFeature>,
}

#[derive(Debug, Deserialize)]
struct OrsFeature {
    geometry: OrsGeometry,
    properties: OrsProperties,
}

#[derive(Debug, Deserialize)]
struct OrsGeometry {
    coordinates: Vec<[f64; 2]>, // [lon, lat] pairs
}

#[derive(Debug, Deserialize)]
struct OrsProperties {
    summary: OrsSummary,
}

#[derive(Debug, Deserialize)]
struct OrsSummary {
    distance: f64, // meters
}

#[derive(Debug, Deserialize)]
struct OrsErrorResponse {
    error: Option<OrsErrorBody>,
}

#[derive(Debug, Deserialize)]
struct OrsErrorBody {
    message: String,
}
