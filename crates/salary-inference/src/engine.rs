//! Inference engine: a thin wrapper over the trained model.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use salary_core::{Error, FeatureVector, Result};

use crate::regressor::Regressor;

/// Runs feature vectors through the opaque model.
#[derive(Clone)]
pub struct InferenceEngine {
    model: Arc<dyn Regressor>,
}

impl InferenceEngine {
    pub fn new(model: Arc<dyn Regressor>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &dyn Regressor {
        self.model.as_ref()
    }

    /// Predict one vector. A non-finite model output is an inference error.
    pub fn predict(&self, vector: &FeatureVector) -> Result<f64> {
        let prediction = self.model.predict(vector.values())?;
        if !prediction.is_finite() {
            return Err(Error::Inference(format!(
                "{} produced a non-finite prediction",
                self.model.model_type()
            )));
        }
        Ok(prediction)
    }

    /// Predict several vectors independently, preserving order.
    pub fn predict_batch(&self, vectors: &[FeatureVector]) -> Result<Vec<f64>> {
        let start = Instant::now();
        let predictions = vectors
            .iter()
            .map(|vector| self.predict(vector))
            .collect::<Result<Vec<_>>>()?;
        debug!(
            batch_size = vectors.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Batch inference complete"
        );
        Ok(predictions)
    }
}

impl std::fmt::Debug for InferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("model", &self.model.model_type())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockRegressor;

    #[test]
    fn test_predict_passes_vector_through() {
        let model = MockRegressor::new().with_bias(10.0);
        let engine = InferenceEngine::new(Arc::new(model.clone()));

        let prediction = engine
            .predict(&FeatureVector::from(vec![1.0, 2.5]))
            .unwrap();
        assert_eq!(prediction, 13.5);
        assert_eq!(model.get_calls()[0].features, vec![1.0, 2.5]);
    }

    #[test]
    fn test_non_finite_output_is_inference_error() {
        let engine = InferenceEngine::new(Arc::new(MockRegressor::new().with_fixed_output(f64::NAN)));
        let err = engine.predict(&FeatureVector::zeros(2)).unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
    }

    #[test]
    fn test_model_error_propagates() {
        let engine = InferenceEngine::new(Arc::new(MockRegressor::new().with_n_features(3)));
        let err = engine.predict(&FeatureVector::zeros(2)).unwrap_err();
        assert!(err.to_string().contains("shape mismatch"));
    }

    #[test]
    fn test_batch_matches_single_predictions() {
        let engine = InferenceEngine::new(Arc::new(MockRegressor::new().with_bias(1.0)));
        let vectors = vec![
            FeatureVector::from(vec![1.0, 1.0]),
            FeatureVector::from(vec![0.0, 0.0]),
            FeatureVector::from(vec![5.0, -2.0]),
        ];

        let batch = engine.predict_batch(&vectors).unwrap();
        let singles: Vec<f64> = vectors.iter().map(|v| engine.predict(v).unwrap()).collect();
        assert_eq!(batch, singles);
        assert_eq!(batch, vec![3.0, 1.0, 4.0]);
    }

    #[test]
    fn test_empty_batch() {
        let engine = InferenceEngine::new(Arc::new(MockRegressor::new()));
        assert!(engine.predict_batch(&[]).unwrap().is_empty());
    }
}
