use crate::models::{Coordinates, NewStation, StationOnRoute};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashSet;

/// Render a polyline as WKT for binding into spatial queries.
fn linestring_wkt(polyline: &[Coordinates]) -> String {
    let points = polyline
        .iter()
        .map(|c| format!("{} {}", c.lon, c.lat))
        .collect::<Vec<_>>()
        .join(", ");
    format!("LINESTRING({})", points)
}

/// Fetch stations within `buffer_degrees` of the route line, annotated with
/// their fractional position along it, ascending along the travel direction.
///
/// ST_DWithin keeps the GiST index in play (a materialised buffer polygon
/// would not); ST_LineLocatePoint does the projection in the same pass.
pub async fn stations_within_buffer(
    pool: &PgPool,
    polyline: &[Coordinates],
    buffer_degrees: f64,
) -> Result<Vec<StationOnRoute>, sqlx::Error> {
    let line_wkt = linestring_wkt(polyline);

    let rows = sqlx::query_as::<_, StationRow>(
        r#"
        SELECT opis_id, name, address, retail_price,
               ST_Y(location) AS lat, ST_X(location) AS lon,
               ST_LineLocatePoint(ST_GeomFromText($1, 4326), location) AS fraction
        FROM fuel_stations
        WHERE ST_DWithin(location, ST_GeomFromText($1, 4326), $2)
        ORDER BY fraction
        "#,
    )
    .bind(&line_wkt)
    .bind(buffer_degrees)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(StationRow::into_station).collect())
}

pub async fn count_stations(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM fuel_stations")
        .fetch_one(pool)
        .await
}

pub async fn existing_opis_ids(pool: &PgPool) -> Result<HashSet<i32>, sqlx::Error> {
    let ids: Vec<i32> = sqlx::query_scalar("SELECT opis_id FROM fuel_stations")
        .fetch_all(pool)
        .await?;
    Ok(ids.into_iter().collect())
}

/// Insert a batch of geocoded stations, skipping duplicates by opis_id.
/// Returns the number of rows actually inserted.
pub async fn insert_stations(pool: &PgPool, stations: &[NewStation]) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for station in stations {
        let result = sqlx::query(
            r#"
            INSERT INTO fuel_stations (opis_id, name, address, city, state, retail_price, location)
            VALUES ($1, $2, $3, $4, $5, $6, ST_SetSRID(ST_MakePoint($7, $8), 4326))
            ON CONFLICT (opis_id) DO NOTHING
            "#,
        )
        .bind(station.opis_id)
        .bind(&station.name)
        .bind(&station.address)
        .bind(&station.city)
        .bind(&station.state)
        .bind(station.retail_price)
        .bind(station.lon)
        .bind(station.lat)
        .execute(&mut *tx)
        .await?;
        inserted += result.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

#[derive(sqlx::FromRow)]
struct StationRow {
    opis_id: i32,
    name: String,
    address: String,
    retail_price: Decimal,
    lat: f64,
    lon: f64,
    fraction: f64,
}

impl StationRow {
    fn into_station(self) -> StationOnRoute {
        StationOnRoute {
            opis_id: self.opis_id,
            name: self.name,
            address: self.address,
            retail_price: self.retail_price,
            lat: self.lat,
            lon: self.lon,
            fraction: self.fraction,
        }
    }
}
