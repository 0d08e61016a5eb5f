use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid request: {0}")]
    InvalidInput(String),

    #[error("Resolution failed: {0}")]
    Resolution(String),

    #[error("Routing provider error: {0}")]
    Upstream(String),

    #[error("Infeasible route: {0}")]
    Infeasible(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses. Planning failures are client errors
// with a `detail` message; upstream and database internals are logged only.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal database error".to_string(),
                )
            }
            AppError::InvalidInput(e) => (StatusCode::BAD_REQUEST, e),
            AppError::Resolution(e) => (StatusCode::BAD_REQUEST, e),
            AppError::Upstream(ref e) => {
                tracing::error!("Routing provider error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    "Routing provider error".to_string(),
                )
            }
            AppError::Infeasible(e) => (StatusCode::BAD_REQUEST, e),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "detail": detail }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn database_error_500() {
        let err = AppError::Database(sqlx::Error::PoolClosed);
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_input_400() {
        let err = AppError::InvalidInput("start is required".into());
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn resolution_400() {
        let err = AppError::Resolution("Could not resolve start location.".into());
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_400() {
        let err = AppError::Upstream("HTTP 502: gateway".into());
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infeasible_400() {
        let err = AppError::Infeasible("gap wider than vehicle range".into());
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_500() {
        let err = AppError::Internal("unexpected".into());
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn upstream_detail_is_not_leaked() {
        let err = AppError::Upstream("provider key invalid: sk-123".into());
        let response = err.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], "Routing provider error");
    }
}
