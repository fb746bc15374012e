//! Loading of the artifacts produced by the training pipeline.
//!
//! | Artifact | Missing or corrupt |
//! |----------|--------------------|
//! | model    | [`Error::ArtifactLoad`] |
//! | schema   | [`Error::ArtifactLoad`] |
//! | scaler   | warning, no scaler |
//! | metadata | warning, empty metadata |

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use salary_core::{Error, ModelMetadata, Result};

use crate::regressor::{ModelArtifact, Regressor};
use crate::scaler::StandardScaler;

/// Read and parse a JSON artifact, reporting failures as [`Error::ArtifactLoad`].
fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::ArtifactLoad(format!("failed to read {} {}: {}", what, path.display(), e))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        Error::ArtifactLoad(format!("failed to parse {} {}: {}", what, path.display(), e))
    })
}

/// Load the trained model.
pub fn load_model(path: &Path) -> Result<Arc<dyn Regressor>> {
    let artifact: ModelArtifact = read_json(path, "model")?;
    let model: Arc<dyn Regressor> = Arc::from(artifact.into_regressor()?);
    info!(
        path = %path.display(),
        model = model.model_type(),
        n_features = ?model.n_features(),
        "Model loaded"
    );
    Ok(model)
}

/// Load the optional scaler. Absence or corruption degrades to no scaler.
pub fn load_scaler(path: &Path) -> Option<StandardScaler> {
    if !path.exists() {
        warn!(path = %path.display(), "Scaler file not found, continuing without scaler");
        return None;
    }
    match read_json::<StandardScaler>(path, "scaler").and_then(|s| s.validate().map(|_| s)) {
        Ok(scaler) => {
            info!(
                path = %path.display(),
                n_features = scaler.n_features(),
                "Scaler loaded"
            );
            Some(scaler)
        }
        Err(e) => {
            warn!(error = %e, "Scaler unusable, continuing without scaler");
            None
        }
    }
}

/// Load model metadata. Any failure degrades to empty metadata, whose
/// accessors supply the documented defaults. A negative or non-finite MAE is
/// treated as unknown.
pub fn load_metadata(path: &Path) -> ModelMetadata {
    match read_json::<ModelMetadata>(path, "model info") {
        Ok(mut metadata) => {
            if let Some(mae) = metadata.test_mae.filter(|mae| !(mae.is_finite() && *mae >= 0.0)) {
                warn!(
                    path = %path.display(),
                    test_mae = mae,
                    "Invalid test_mae in model info, treating it as unknown"
                );
                metadata.test_mae = None;
            }
            info!(
                path = %path.display(),
                model_type = metadata.model_type_or_na(),
                "Model info loaded"
            );
            metadata
        }
        Err(e) => {
            warn!(error = %e, "Model info unavailable, using defaults");
            ModelMetadata::default()
        }
    }
}
