// Library exports for testing and reusability

pub mod cache;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use cache::CacheStats;
pub use error::{AppError, Result};

// App state for sharing across the application
use services::planner::RoutePlanner;

pub struct AppState {
    pub db_pool: sqlx::PgPool,
    pub planner: RoutePlanner,
}
