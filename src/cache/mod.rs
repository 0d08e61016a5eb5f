use crate::models::{Coordinates, RouteGeometry};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Build the cache key for a routed coordinate pair.
///
/// Endpoints are formatted `(lon, lat)` to exactly 6 decimal places before
/// hashing, so requests differing below ~11 cm collide on purpose: the cache
/// is keyed on city-scale endpoints, not raw input strings.
pub fn route_fingerprint(start: &Coordinates, end: &Coordinates) -> String {
    let raw = format!(
        "{:.6},{:.6}|{:.6},{:.6}",
        start.lon, start.lat, end.lon, end.lat
    );
    format!("ors_route:{:x}", md5::compute(raw.as_bytes()))
}

/// In-memory route cache backed by moka with TTL and bounded capacity.
/// All methods take `&self`, no locking needed; concurrent writers for the
/// same fingerprint are tolerated (last writer wins).
pub struct RouteCache {
    routes: Cache<String, Arc<RouteGeometry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RouteCache {
    pub fn new(ttl_seconds: u64, max_capacity: u64) -> Self {
        let routes = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        RouteCache {
            routes,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub async fn get(&self, key: &str) -> Option<RouteGeometry> {
        match self.routes.get(key).await {
            Some(geometry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("route cache hit: {}", key);
                Some((*geometry).clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("route cache miss: {}", key);
                None
            }
        }
    }

    pub async fn insert(&self, key: String, geometry: RouteGeometry) {
        self.routes.insert(key, Arc::new(geometry)).await;
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let hit_rate = if hits + misses > 0 {
            (hits as f64 / (hits + misses) as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            hits,
            misses,
            hit_rate,
        }
    }
}

/// Cache statistics for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}
