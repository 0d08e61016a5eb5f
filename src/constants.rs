// Application-wide constants
// This module centralizes all magic numbers and hardcoded values for better maintainability

// Server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "3000";

// Vehicle model
pub const VEHICLE_RANGE_MI: f64 = 500.0;
pub const VEHICLE_MPG: u32 = 10;

// Station selection
pub const STATION_BUFFER_MI: f64 = 10.0;
pub const DEGREES_PER_MILE: f64 = 1.0 / 69.0;
pub const PREFILTER_SEGMENT_MI: f64 = 50.0;

// Unit conversion
pub const METERS_TO_MILES: f64 = 0.000_621_371;

// Route cache
pub const DEFAULT_ROUTE_CACHE_TTL_SECONDS: u64 = 3_600;
pub const ROUTE_CACHE_MAX_ENTRIES: u64 = 1_000;

// Upstream endpoints and timeouts
pub const ORS_ROUTE_URL: &str =
    "https://api.openrouteservice.org/v2/directions/driving-car/geojson";
pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const ORS_TIMEOUT_SECS: u64 = 30;
pub const GEOCODER_TIMEOUT_SECS: u64 = 10;

// Geocoder identification (Nominatim requires a contactable UA)
pub const DEFAULT_GEOCODER_USER_AGENT: &str = "fuelroute/1.0 (contact: ops@fuelroute.local)";
