//! salary-api - HTTP API server for salary-predict
//!
//! The router is built here so integration tests can serve it on an
//! ephemeral port; `main.rs` only wires configuration and logging.

pub mod handlers;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, warn};
use uuid::Uuid;

use salary_core::defaults;
use salary_inference::PredictorHandle;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated CORS whitelist.
    pub allowed_origins: String,
    pub batch_predict_max: usize,
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
            allowed_origins: defaults::ALLOWED_ORIGINS.to_string(),
            batch_predict_max: defaults::BATCH_PREDICT_MAX,
            max_body_size: defaults::MAX_BODY_SIZE_BYTES,
        }
    }
}

impl ServerConfig {
    /// Environment variables:
    ///   HOST, PORT, ALLOWED_ORIGINS, BATCH_PREDICT_MAX
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| defaults::SERVER_HOST.to_string());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| defaults::SERVER_PORT.to_string())
            .parse()
            .unwrap_or(defaults::SERVER_PORT);
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| defaults::ALLOWED_ORIGINS.to_string());
        let batch_predict_max: usize = std::env::var("BATCH_PREDICT_MAX")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults::BATCH_PREDICT_MAX);

        Self {
            host,
            port,
            allowed_origins,
            batch_predict_max,
            max_body_size: defaults::MAX_BODY_SIZE_BYTES,
        }
    }
}

// =============================================================================
// STATE
// =============================================================================

#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup; never reloaded.
    pub predictor: Arc<PredictorHandle>,
    pub batch_predict_max: usize,
}

impl AppState {
    pub fn new(predictor: PredictorHandle, config: &ServerConfig) -> Self {
        Self {
            predictor: Arc::new(predictor),
            batch_predict_max: config.batch_predict_max,
        }
    }
}

// =============================================================================
// RESPONSES AND ERRORS
// =============================================================================

/// Success envelope: `{"success": true, "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn json(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unavailable(String),
    Internal(String),
}

impl From<salary_core::Error> for ApiError {
    fn from(err: salary_core::Error) -> Self {
        match err {
            salary_core::Error::Encoding(_) | salary_core::Error::InvalidInput(_) => {
                ApiError::BadRequest(err.to_string())
            }
            salary_core::Error::ModelUnavailable(_) => ApiError::Unavailable(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => {
                error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Parse a comma-separated origin whitelist. Invalid entries are skipped;
/// an empty list falls back to the default origin.
///
/// ```text
/// ALLOWED_ORIGINS=https://salary.example.com,http://localhost:5000
/// ```
pub fn parse_allowed_origins(raw: &str) -> Vec<HeaderValue> {
    if raw.trim().is_empty() {
        return vec![HeaderValue::from_static(defaults::ALLOWED_ORIGINS)];
    }

    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::info::health_check))
        .route("/api/predict", post(handlers::predict::predict))
        .route("/api/predict/batch", post(handlers::predict::predict_batch))
        .route("/api/model-info", get(handlers::info::model_info))
        .route("/api/vocabulary", get(handlers::info::vocabulary))
        // Middleware
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parse_allowed_origins(
                    &config.allowed_origins,
                )))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .max_age(std::time::Duration::from_secs(defaults::CORS_MAX_AGE_SECS)),
        )
        .layer(RequestBodyLimitLayer::new(config.max_body_size))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins() {
        let origins = parse_allowed_origins("https://a.example.com, http://localhost:5000 ,");
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "https://a.example.com");
        assert_eq!(origins[1], "http://localhost:5000");
    }

    #[test]
    fn test_parse_allowed_origins_empty_uses_default() {
        let origins = parse_allowed_origins("  ");
        assert_eq!(origins, vec![HeaderValue::from_static("http://localhost:5000")]);
    }

    #[test]
    fn test_parse_allowed_origins_skips_invalid() {
        let origins = parse_allowed_origins("https://ok.example.com,bad\norigin");
        assert_eq!(origins.len(), 1);
    }

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                salary_core::Error::Encoding("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                salary_core::Error::InvalidInput("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                salary_core::Error::ModelUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                salary_core::Error::Inference("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                salary_core::Error::ArtifactLoad("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.batch_predict_max, 100);
    }
}
