//! Standard feature scaler.
//!
//! Loaded alongside the model when the training pipeline exported one. The
//! current model consumes unscaled features, so the prediction path does not
//! apply it.

use serde::Deserialize;

use salary_core::{Error, FeatureVector, Result};

/// `(x - mean) / scale` per feature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Check lengths and values after deserialization.
    pub fn validate(&self) -> Result<()> {
        if self.mean.len() != self.scale.len() {
            return Err(Error::ArtifactLoad(format!(
                "scaler has {} means but {} scales",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self
            .mean
            .iter()
            .chain(&self.scale)
            .any(|v| !v.is_finite())
        {
            return Err(Error::ArtifactLoad(
                "scaler parameters must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Scale a vector. A zero scale leaves the centered value unchanged.
    pub fn transform(&self, vector: &FeatureVector) -> Result<FeatureVector> {
        if vector.len() != self.n_features() {
            return Err(Error::Inference(format!(
                "shape mismatch: scaler expects {} features, got {}",
                self.n_features(),
                vector.len()
            )));
        }
        Ok(vector
            .values()
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect::<Vec<_>>()
            .into())
    }
}
