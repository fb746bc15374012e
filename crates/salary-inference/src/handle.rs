//! Bootstrap-time predictor state.
//!
//! Artifact loading happens exactly once. A failure is captured as
//! [`PredictorHandle::Unavailable`] and every later call reports
//! [`Error::ModelUnavailable`] without retrying the load.

use std::sync::Arc;

use tracing::error;

use salary_core::{Error, ModelInfo, PredictionResult, RawInputRecord, Result};

use crate::config::PredictorConfig;
use crate::predictor::Predictor;

/// Either a ready predictor or the reason it could not be loaded.
#[derive(Debug, Clone)]
pub enum PredictorHandle {
    Ready(Arc<Predictor>),
    Unavailable { reason: String },
}

impl PredictorHandle {
    /// Load the predictor. Never panics; failures become `Unavailable`.
    pub fn bootstrap(config: &PredictorConfig) -> Self {
        match Predictor::load(config) {
            Ok(predictor) => Self::Ready(Arc::new(predictor)),
            Err(e) => {
                error!(error = %e, "Predictor failed to load, serving as unavailable");
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn ready(predictor: Predictor) -> Self {
        Self::Ready(Arc::new(predictor))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }

    pub fn predictor(&self) -> Result<&Arc<Predictor>> {
        match self {
            Self::Ready(predictor) => Ok(predictor),
            Self::Unavailable { reason } => Err(Error::ModelUnavailable(reason.clone())),
        }
    }

    pub fn predict_with_details(&self, raw: &RawInputRecord) -> Result<PredictionResult> {
        self.predictor()?.predict_with_details(raw)
    }

    pub fn predict_batch(&self, records: &[RawInputRecord]) -> Result<Vec<f64>> {
        self.predictor()?.predict_batch(records)
    }

    pub fn model_info(&self) -> Result<ModelInfo> {
        Ok(self.predictor()?.model_info())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockRegressor;
    use salary_core::{FeatureSchema, ModelMetadata};

    #[test]
    fn test_bootstrap_missing_artifacts_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let handle = PredictorHandle::bootstrap(&PredictorConfig::from_dir(dir.path()));

        assert!(!handle.is_ready());
        assert!(handle.unavailable_reason().unwrap().contains("best_model.json"));
    }

    #[test]
    fn test_unavailable_handle_rejects_every_call() {
        let handle = PredictorHandle::unavailable("model file missing");

        for _ in 0..3 {
            let err = handle
                .predict_with_details(&RawInputRecord::default())
                .unwrap_err();
            assert!(matches!(err, Error::ModelUnavailable(ref r) if r == "model file missing"));
        }
        assert!(matches!(
            handle.predict_batch(&[]),
            Err(Error::ModelUnavailable(_))
        ));
        assert!(matches!(handle.model_info(), Err(Error::ModelUnavailable(_))));
    }

    #[test]
    fn test_ready_handle_delegates() {
        let schema = FeatureSchema::new(vec!["skills_count".to_string()]).unwrap();
        let predictor = Predictor::from_parts(
            Arc::new(MockRegressor::new().with_bias(20.0)),
            schema,
            None,
            ModelMetadata::default(),
        );
        let handle = PredictorHandle::ready(predictor);
        let raw = RawInputRecord {
            skills: Some("a, b".to_string()),
            ..Default::default()
        };

        assert!(handle.is_ready());
        assert_eq!(handle.unavailable_reason(), None);
        assert_eq!(handle.predict_with_details(&raw).unwrap().predicted_salary, 22.0);
        assert_eq!(handle.model_info().unwrap().n_features, 1);
    }
}
