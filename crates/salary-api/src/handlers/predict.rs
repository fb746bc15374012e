//! Prediction endpoints.
//!
//! Both endpoints enforce the required-field policy before the record
//! reaches the encoder, which itself accepts partial records.

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use salary_core::{Error, PredictionResult, RawInputRecord};

use crate::{ApiError, ApiSuccess, AppState};

#[derive(Debug, Deserialize)]
pub struct BatchPredictRequest {
    pub records: Vec<RawInputRecord>,
}

#[derive(Debug, Serialize)]
pub struct BatchPredictResponse {
    /// One raw prediction per record, in request order.
    pub predictions: Vec<f64>,
}

fn check_required(record: &RawInputRecord) -> Result<(), String> {
    let missing = record.missing_required();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("missing required fields: {}", missing.join(", ")))
    }
}

fn invalid(message: String) -> ApiError {
    Error::InvalidInput(message).into()
}

fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    debug!(error = %rejection, "Rejected request body");
    ApiError::BadRequest(rejection.body_text())
}

/// POST /api/predict
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<RawInputRecord>, JsonRejection>,
) -> Result<Json<ApiSuccess<PredictionResult>>, ApiError> {
    let Json(record) = payload.map_err(rejection_to_error)?;
    check_required(&record).map_err(invalid)?;

    let start = Instant::now();
    let result = state.predictor.predict_with_details(&record)?;
    info!(
        predicted_salary = result.predicted_salary,
        category = result.salary_category.label(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Prediction served"
    );
    Ok(ApiSuccess::json(result))
}

/// POST /api/predict/batch
pub async fn predict_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchPredictRequest>, JsonRejection>,
) -> Result<Json<ApiSuccess<BatchPredictResponse>>, ApiError> {
    let Json(request) = payload.map_err(rejection_to_error)?;

    if request.records.is_empty() {
        return Err(invalid(
            "records must contain at least one record".to_string(),
        ));
    }
    if request.records.len() > state.batch_predict_max {
        return Err(invalid(format!(
            "batch of {} records exceeds the limit of {}",
            request.records.len(),
            state.batch_predict_max
        )));
    }
    for (i, record) in request.records.iter().enumerate() {
        check_required(record).map_err(|e| invalid(format!("record {}: {}", i, e)))?;
    }

    let start = Instant::now();
    let predictions = state.predictor.predict_batch(&request.records)?;
    info!(
        batch_size = predictions.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Batch prediction served"
    );
    Ok(ApiSuccess::json(BatchPredictResponse { predictions }))
}
