use rust_decimal::Decimal;

/// A fuel station row returned by the spatial selector, annotated with its
/// fractional position along the queried route (0.0 at the start, 1.0 at the
/// end). Rows arrive ordered by `fraction`.
#[derive(Debug, Clone, PartialEq)]
pub struct StationOnRoute {
    pub opis_id: i32,
    pub name: String,
    pub address: String,
    pub retail_price: Decimal,
    pub lat: f64,
    pub lon: f64,
    pub fraction: f64,
}

/// A geocoded station ready for insertion, produced by the importer.
#[derive(Debug, Clone)]
pub struct NewStation {
    pub opis_id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub retail_price: Decimal,
    pub lat: f64,
    pub lon: f64,
}
