//! Predictor configuration.
//!
//! Artifact locations resolve from environment variables, falling back to
//! file names inside a models directory:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SALARY_MODELS_DIR` | `models` |
//! | `SALARY_MODEL_PATH` | `<dir>/best_model.json` |
//! | `SALARY_SCALER_PATH` | `<dir>/scaler.json` |
//! | `SALARY_FEATURES_PATH` | `<dir>/features_list.json` |
//! | `SALARY_MODEL_INFO_PATH` | `<dir>/model_info.json` |

use std::path::{Path, PathBuf};

use tracing::debug;

use salary_core::defaults;

/// Paths of the artifacts the predictor loads at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorConfig {
    /// Trained model (required).
    pub model_path: PathBuf,
    /// Feature scaler (optional).
    pub scaler_path: PathBuf,
    /// Ordered feature schema (required).
    pub features_path: PathBuf,
    /// Model metadata (optional, degrades to defaults).
    pub model_info_path: PathBuf,
}

impl PredictorConfig {
    /// Default file names inside `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model_path: dir.join(defaults::MODEL_FILE),
            scaler_path: dir.join(defaults::SCALER_FILE),
            features_path: dir.join(defaults::FEATURES_FILE),
            model_info_path: dir.join(defaults::MODEL_INFO_FILE),
        }
    }

    /// Resolve from environment variables, each path individually overridable.
    pub fn from_env() -> Self {
        let dir = std::env::var("SALARY_MODELS_DIR")
            .unwrap_or_else(|_| defaults::MODELS_DIR.to_string());
        let base = Self::from_dir(&dir);

        let config = Self {
            model_path: env_path("SALARY_MODEL_PATH").unwrap_or(base.model_path),
            scaler_path: env_path("SALARY_SCALER_PATH").unwrap_or(base.scaler_path),
            features_path: env_path("SALARY_FEATURES_PATH").unwrap_or(base.features_path),
            model_info_path: env_path("SALARY_MODEL_INFO_PATH").unwrap_or(base.model_info_path),
        };
        debug!(?config, "Predictor configuration resolved");
        config
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self::from_dir(defaults::MODELS_DIR)
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
