//! # salary-inference
//!
//! Feature encoding and inference pipeline for salary-predict.
//!
//! This crate provides:
//! - Artifact loading (model, optional scaler, feature schema, metadata)
//! - The [`Regressor`] trait and the JSON model formats that implement it
//! - The feature encoder turning raw job attributes into schema-aligned vectors
//! - The inference engine wrapping the opaque trained model
//! - The result composer producing the user-facing prediction
//! - [`Predictor`] tying the pipeline together, and [`PredictorHandle`] holding
//!   either a ready predictor or the reason it is permanently unavailable
//!
//! # Example
//!
//! ```rust,no_run
//! use salary_inference::{PredictorConfig, PredictorHandle};
//! use salary_core::RawInputRecord;
//!
//! let handle = PredictorHandle::bootstrap(&PredictorConfig::from_env());
//! let record: RawInputRecord = serde_json::from_str(
//!     r#"{"city": "Hà Nội", "experience": "2-5 năm", "position_level": "Nhân viên"}"#,
//! ).unwrap();
//! let result = handle.predict_with_details(&record).unwrap();
//! println!("{} ({})", result.predicted_salary_formatted, result.salary_category);
//! ```

pub mod artifacts;
pub mod composer;
pub mod config;
pub mod encoder;
pub mod engine;
pub mod handle;
pub mod predictor;
pub mod regressor;
pub mod scaler;

// Call-recording regressor for testing
#[cfg(test)]
pub mod mock;

// Re-export core types
pub use salary_core::*;

pub use composer::{compose, format_salary};
pub use config::PredictorConfig;
pub use encoder::FeatureEncoder;
pub use engine::InferenceEngine;
pub use handle::PredictorHandle;
pub use predictor::Predictor;
pub use regressor::{LinearRegressor, ModelArtifact, Regressor, Tree, TreeEnsemble, TreeNode};
pub use scaler::StandardScaler;
