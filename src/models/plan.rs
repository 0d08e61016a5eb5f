use crate::models::{Coordinates, RouteFeature};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A node of the refuel graph: the synthetic start, a candidate station, or
/// the synthetic finish. The synthetic endpoints carry `price = 0` (the
/// vehicle departs with a full tank and buys nothing at the destination).
#[derive(Debug, Clone, PartialEq)]
pub struct RouteNode {
    /// Distance from the route start, in miles.
    pub mileage: f64,
    /// Retail price per gallon at this node, in dollars.
    pub price: f64,
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub address: String,
    pub station_id: Option<i32>,
}

impl RouteNode {
    pub fn start(at: Coordinates) -> Self {
        RouteNode {
            mileage: 0.0,
            price: 0.0,
            lat: at.lat,
            lon: at.lon,
            name: "Start".to_string(),
            address: String::new(),
            station_id: None,
        }
    }

    pub fn finish(total_miles: f64, at: Coordinates) -> Self {
        RouteNode {
            mileage: total_miles,
            price: 0.0,
            lat: at.lat,
            lon: at.lon,
            name: "Finish".to_string(),
            address: String::new(),
            station_id: None,
        }
    }
}

/// One refuel event on the optimal path. `gallons` covers the leg from this
/// stop to the next node in the path; `cost = gallons x price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub mileage: f64,
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub address: String,
    pub price: f64,
    pub gallons: f64,
    pub cost: f64,
}

/// The assembled planning response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    pub route_geojson: RouteFeature,
    pub stops: Vec<Stop>,
    pub total_fuel_cost: Decimal,
    pub total_gallons: Decimal,
    pub total_miles: f64,
    pub mpg_used: u32,
}

// Request types for the planning endpoint

#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl PlanRequest {
    /// Both fields are required, non-empty strings.
    pub fn validate(&self) -> Result<(&str, &str), String> {
        let start = match self.start.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => return Err("start is required".to_string()),
        };
        let end = match self.end.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => return Err("end is required".to_string()),
        };
        Ok((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_endpoints_carry_zero_price() {
        let start = RouteNode::start(Coordinates::new(40.0, -74.0).unwrap());
        assert_eq!(start.mileage, 0.0);
        assert_eq!(start.price, 0.0);
        assert!(start.station_id.is_none());

        let finish = RouteNode::finish(812.5, Coordinates::new(41.0, -73.0).unwrap());
        assert_eq!(finish.mileage, 812.5);
        assert_eq!(finish.price, 0.0);
    }

    #[test]
    fn plan_request_requires_both_fields() {
        let req = PlanRequest {
            start: Some("40.7,-74.0".to_string()),
            end: Some("41.0,-73.0".to_string()),
        };
        assert!(req.validate().is_ok());

        let missing_end = PlanRequest {
            start: Some("40.7,-74.0".to_string()),
            end: None,
        };
        assert_eq!(missing_end.validate().unwrap_err(), "end is required");

        let blank_start = PlanRequest {
            start: Some("   ".to_string()),
            end: Some("41.0,-73.0".to_string()),
        };
        assert_eq!(blank_start.validate().unwrap_err(), "start is required");
    }
}
