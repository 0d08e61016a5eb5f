//! CLI tool that imports the OPIS truck-stop price sheet into the station
//! table, geocoding each row through Nominatim (sequential, rate limited)
//! with a city-level fallback.
//!
//! ```text
//! cargo run --bin import_stations -- \
//!     --input fuel-prices-for-be-assessment.csv \
//!     --batch-size 200
//! ```

use fuelroute::constants::DEFAULT_GEOCODER_USER_AGENT;
use fuelroute::db::station_queries;
use fuelroute::models::NewStation;
use fuelroute::services::geocoder::NominatimClient;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::time::Duration;

const DEFAULT_INPUT: &str = "fuel-prices-for-be-assessment.csv";
const DEFAULT_BATCH_SIZE: usize = 200;

// Nominatim allows at most 1 request/second
const GEOCODE_PAUSE_MS: u64 = 1_200;

#[derive(Debug, Deserialize)]
struct CsvStationRecord {
    #[serde(rename = "OPIS Truckstop ID")]
    opis_id: f64,
    #[serde(rename = "Truckstop Name")]
    name: String,
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Retail Price")]
    retail_price: f64,
}

/// Strip highway-exit markers (EXIT 42, MM 118, AT MILE 7) and normalize
/// `&`/`/` junction punctuation so the address geocodes as a street query.
fn clean_highway_address(raw: &str) -> String {
    let normalized = raw.replace('&', " and ").replace('/', " and ");

    let mut kept: Vec<&str> = Vec::new();
    let mut skip = 0usize;
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    for (i, token) in tokens.iter().enumerate() {
        if skip > 0 {
            skip -= 1;
            continue;
        }
        let upper = token.trim_matches(',').to_uppercase();
        match upper.as_str() {
            "EXIT" | "MM" | "EX" => {
                // drop the marker and its number
                skip = 1;
                continue;
            }
            "AT" if tokens.get(i + 1).map(|t| t.to_uppercase()) == Some("MILE".to_string()) => {
                // drop "AT MILE <n>"
                skip = 2;
                continue;
            }
            _ => kept.push(token),
        }
    }

    kept.join(" ").trim_matches([' ', ','].as_slice()).to_string()
}

fn print_usage() {
    println!("Usage: import_stations [--input <csv>] [--batch-size <n>]");
    println!();
    println!("  --input       Path to the OPIS price CSV (default: {DEFAULT_INPUT})");
    println!("  --batch-size  Stations per insert batch (default: {DEFAULT_BATCH_SIZE})");
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--help") {
        print_usage();
        return Ok(());
    }

    let input = arg_value(&args, "--input").unwrap_or_else(|| DEFAULT_INPUT.to_string());
    let batch_size: usize = arg_value(&args, "--batch-size")
        .map(|v| v.parse())
        .transpose()
        .map_err(|_| "Invalid --batch-size")?
        .unwrap_or(DEFAULT_BATCH_SIZE)
        .max(1);

    let database_url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;
    let user_agent = env::var("GEOCODER_USER_AGENT")
        .unwrap_or_else(|_| DEFAULT_GEOCODER_USER_AGENT.to_string());

    let pool = fuelroute::db::create_pool(&database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let geocoder = NominatimClient::new(&user_agent)?;

    let mut existing = station_queries::existing_opis_ids(&pool).await?;
    println!("Stations already in DB: {}", existing.len());

    let mut reader = csv::Reader::from_path(&input)?;
    let mut pending: Vec<CsvStationRecord> = Vec::new();
    for record in reader.deserialize() {
        let record: CsvStationRecord = record?;
        let opis_id = record.opis_id as i32;
        if existing.contains(&opis_id) {
            continue;
        }
        existing.insert(opis_id); // also dedupes repeated CSV rows
        pending.push(record);
    }

    let total = pending.len();
    println!("--- Import: {} stations to process ---", total);

    let mut by_address = 0usize;
    let mut by_city = 0usize;
    let mut failed = 0usize;
    let mut inserted = 0u64;
    let mut batch: Vec<NewStation> = Vec::new();

    for (n, record) in pending.into_iter().enumerate() {
        let clean = clean_highway_address(&record.address);
        let address_query = format!("{}, {}, {}, USA", clean, record.city, record.state);

        let mut method = "ADDRESS";
        let mut coords = geocoder.search(&address_query).await;
        tokio::time::sleep(Duration::from_millis(GEOCODE_PAUSE_MS)).await;

        if coords.is_none() {
            let city_query = format!("{}, {}, USA", record.city, record.state);
            coords = geocoder.search(&city_query).await;
            method = "CITY_FALLBACK";
            tokio::time::sleep(Duration::from_millis(GEOCODE_PAUSE_MS)).await;
        }

        let Some(point) = coords else {
            failed += 1;
            println!("[{}/{}] FAILED: {}", n + 1, total, record.name);
            continue;
        };

        match method {
            "ADDRESS" => by_address += 1,
            _ => by_city += 1,
        }
        println!("[{}/{}] {}: {}", n + 1, total, method, record.name);

        batch.push(NewStation {
            opis_id: record.opis_id as i32,
            name: record.name,
            address: record.address,
            city: record.city,
            state: record.state,
            retail_price: Decimal::from_f64(record.retail_price)
                .unwrap_or_default()
                .round_dp(3),
            lat: point.lat,
            lon: point.lon,
        });

        if batch.len() >= batch_size {
            inserted += station_queries::insert_stations(&pool, &batch).await?;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        inserted += station_queries::insert_stations(&pool, &batch).await?;
    }

    println!();
    println!("--- Summary ---");
    println!("  Inserted: {}", inserted);
    println!(
        "  Address={}  City={}  Failed={}",
        by_address, by_city, failed
    );
    println!(
        "  Total in DB: {}",
        station_queries::count_stations(&pool).await?
    );

    Ok(())
}
