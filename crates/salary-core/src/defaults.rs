//! Centralized default constants for the salary-predict system.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// ARTIFACTS
// =============================================================================

/// Directory holding the trained artifacts, relative to the working directory.
pub const MODELS_DIR: &str = "models";

/// Serialized trained model.
pub const MODEL_FILE: &str = "best_model.json";

/// Serialized feature scaler (optional).
pub const SCALER_FILE: &str = "scaler.json";

/// Ordered feature schema (JSON array of names).
pub const FEATURES_FILE: &str = "features_list.json";

/// Model metadata (type, test metrics, best hyperparameters).
pub const MODEL_INFO_FILE: &str = "model_info.json";

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 5000;

/// Default CORS origin whitelist.
pub const ALLOWED_ORIGINS: &str = "http://localhost:5000";

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;

/// Maximum request body size in bytes (1 MB).
pub const MAX_BODY_SIZE_BYTES: usize = 1024 * 1024;

/// Maximum records per batch prediction request.
pub const BATCH_PREDICT_MAX: usize = 100;

// =============================================================================
// RESULT COMPOSITION
// =============================================================================

/// Unit suffix appended to formatted salaries (million VND).
pub const SALARY_UNIT_SUFFIX: &str = "tr VND";

/// Placeholder for values that are unknown or were not supplied.
pub const NOT_AVAILABLE: &str = "N/A";

/// Lower bound (inclusive) of the "Trung bình thấp" category.
pub const CATEGORY_LOW_MAX: f64 = 10.0;

/// Lower bound (inclusive) of the "Trung bình cao" category.
pub const CATEGORY_MID_LOW_MAX: f64 = 20.0;

/// Lower bound (inclusive) of the "Cao" category.
pub const CATEGORY_MID_HIGH_MAX: f64 = 30.0;

// =============================================================================
// REQUEST FIELDS
// =============================================================================

/// Fields the HTTP layer requires before a request reaches the encoder.
pub const REQUIRED_FIELDS: [&str; 4] = ["job_title", "city", "experience", "position_level"];
