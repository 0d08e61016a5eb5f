use axum::Router;
use fuelroute::config::Config;
use fuelroute::db::PgStationRepository;
use fuelroute::services::geocoder::NominatimClient;
use fuelroute::services::ors::OrsClient;
use fuelroute::services::planner::RoutePlanner;
use fuelroute::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fuelroute=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting fuelroute API server");
    if config.debug {
        tracing::info!("Debug mode enabled");
    }

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = fuelroute::db::create_pool(&config.database_url).await?;
    tracing::info!("Database connection established");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;
    tracing::info!("Database migrations completed");

    // Upstream clients are built once and reused for the process lifetime
    let geocoder = NominatimClient::new(&config.geocoder_user_agent)?;
    let ors = OrsClient::new(config.ors_api_key.clone(), config.route_cache_ttl)?;

    let station_repo: Arc<dyn fuelroute::db::StationRepository> =
        Arc::new(PgStationRepository::new(db_pool.clone()));
    let planner = RoutePlanner::new(geocoder, ors, station_repo);

    // Create application state
    let state = Arc::new(AppState { db_pool, planner });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api", fuelroute::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
