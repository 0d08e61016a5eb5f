use crate::constants::{GEOCODER_TIMEOUT_SECS, NOMINATIM_SEARCH_URL};
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Fast-path parser for `"lat, lon"` input.
///
/// Accepts an optional leading minus, digits, and an optional fractional
/// part on each side of the comma, with optional whitespace around it.
/// Returns `None` when the string is not shaped like a coordinate pair at
/// all (callers then fall through to the forward geocoder); bounds are the
/// caller's to check.
pub fn parse_coordinate_pair(s: &str) -> Option<(f64, f64)> {
    let (lat_raw, lon_raw) = s.trim().split_once(',')?;
    let (lat_raw, lon_raw) = (lat_raw.trim(), lon_raw.trim());
    if !is_decimal_literal(lat_raw) || !is_decimal_literal(lon_raw) {
        return None;
    }
    Some((lat_raw.parse().ok()?, lon_raw.parse().ok()?))
}

/// `-?ddd` or `-?ddd.` or `-?ddd.ddd` and nothing else (no exponents, no
/// leading `+`, no `inf`/`nan`).
fn is_decimal_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() {
        return false;
    }
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits, ""),
    };
    !int_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit())
}

/// Forward-geocoding client (Nominatim). Built once at startup and shared;
/// the underlying reqwest client keeps its connection pool for the process
/// lifetime.
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_config(user_agent, NOMINATIM_SEARCH_URL.to_string())
    }

    pub fn with_config(user_agent: &str, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(GEOCODER_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build geocoder client: {}", e)))?;
        Ok(NominatimClient { client, base_url })
    }

    /// Resolve a free-form query to coordinates.
    ///
    /// Transport errors, non-2xx statuses, and unparsable bodies are all
    /// treated as "no result": the caller decides whether that is fatal.
    pub async fn search(&self, query: &str) -> Option<Coordinates> {
        let response = match self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("geocoder request failed for {:?}: {}", query, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "geocoder returned HTTP {} for {:?}",
                response.status(),
                query
            );
            return None;
        }

        let places: Vec<NominatimPlace> = match response.json().await {
            Ok(places) => places,
            Err(e) => {
                tracing::warn!("geocoder response unparsable for {:?}: {}", query, e);
                return None;
            }
        };

        let place = places.into_iter().next()?;
        let lat: f64 = place.lat.parse().ok()?;
        let lon: f64 = place.lon.parse().ok()?;
        Coordinates::new(lat, lon).ok()
    }
}

// Nominatim serializes coordinates as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}
