pub mod coordinates;
pub mod geometry;
pub mod plan;
pub mod station;

pub use coordinates::Coordinates;
pub use geometry::{LineStringGeometry, RouteFeature, RouteGeometry};
pub use plan::{PlanRequest, PlanResult, RouteNode, Stop};
pub use station::{NewStation, StationOnRoute};
