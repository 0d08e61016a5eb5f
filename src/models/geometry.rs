use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// A driving route as returned by the routing provider: the polyline in
/// travel order plus the total driven distance.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    /// At least two coordinates, ordered along the travel direction.
    pub polyline: Vec<Coordinates>,
    pub total_miles: f64,
}

/// GeoJSON `Feature` wrapping the route as a `LineString` with empty
/// properties, ready for direct rendering on a map client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteFeature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub geometry: LineStringGeometry,
    pub properties: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineStringGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    /// `[lon, lat]` pairs, GeoJSON coordinate order.
    pub coordinates: Vec<[f64; 2]>,
}

impl RouteFeature {
    pub fn line_string(polyline: &[Coordinates]) -> Self {
        RouteFeature {
            feature_type: "Feature".to_string(),
            geometry: LineStringGeometry {
                geometry_type: "LineString".to_string(),
                coordinates: polyline.iter().map(|c| [c.lon, c.lat]).collect(),
            },
            properties: serde_json::json!({}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_serializes_in_geojson_shape() {
        let polyline = vec![
            Coordinates::new(40.0, -74.0).unwrap(),
            Coordinates::new(41.0, -73.0).unwrap(),
        ];
        let feature = RouteFeature::line_string(&polyline);
        let value = serde_json::to_value(&feature).unwrap();

        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "LineString");
        // GeoJSON order is [lon, lat]
        assert_eq!(value["geometry"]["coordinates"][0][0], -74.0);
        assert_eq!(value["geometry"]["coordinates"][0][1], 40.0);
        assert_eq!(value["properties"], serde_json::json!({}));
    }
}
