//! Health, model diagnostics and vocabulary listing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use salary_core::vocab::VocabularyListing;
use salary_core::{ModelInfo, Vocabulary};

use crate::{ApiError, ApiSuccess, AppState};

/// GET /health
///
/// 503 while the predictor is unavailable so orchestrators stop routing
/// traffic to the instance.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.predictor.predictor() {
        Ok(predictor) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "healthy",
                "predictor_loaded": true,
                "loaded_at": predictor.loaded_at().to_rfc3339(),
                "version": env!("CARGO_PKG_VERSION"),
            })),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "status": "unhealthy",
                "predictor_loaded": false,
                "reason": state.predictor.unavailable_reason().unwrap_or_default(),
            })),
        ),
    }
}

/// GET /api/model-info
pub async fn model_info(
    State(state): State<AppState>,
) -> Result<Json<ApiSuccess<ModelInfo>>, ApiError> {
    Ok(ApiSuccess::json(state.predictor.model_info()?))
}

/// GET /api/vocabulary
///
/// Option lists for experience brackets and position levels, in rank order.
pub async fn vocabulary(State(state): State<AppState>) -> Json<ApiSuccess<VocabularyListing>> {
    let listing = match state.predictor.predictor() {
        Ok(predictor) => predictor.vocabulary().listing(),
        Err(_) => Vocabulary::builtin().listing(),
    };
    ApiSuccess::json(listing)
}
