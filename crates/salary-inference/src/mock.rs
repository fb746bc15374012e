//! Mock regressor for deterministic testing.
//!
//! Returns `bias + Σ x_i` (or a fixed value) and records every call so
//! tests can assert on what the engine handed to the model.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let model = MockRegressor::new().with_bias(10.0);
//! let engine = InferenceEngine::new(Arc::new(model.clone()));
//! engine.predict(&FeatureVector::from(vec![1.0, 2.0])).unwrap();
//! assert_eq!(model.call_count(), 1);
//! ```

use std::sync::{Arc, Mutex};

use salary_core::{Error, Result};

use crate::regressor::Regressor;

/// Call-recording regressor.
#[derive(Clone)]
pub struct MockRegressor {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone, Default)]
struct MockConfig {
    bias: f64,
    fixed_output: Option<f64>,
    n_features: Option<usize>,
    fail_with: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MockCall {
    pub features: Vec<f64>,
    pub timestamp: std::time::Instant,
}

impl MockRegressor {
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Constant added to the feature sum.
    pub fn with_bias(mut self, bias: f64) -> Self {
        Arc::make_mut(&mut self.config).bias = bias;
        self
    }

    /// Return this value for every call, ignoring the features.
    pub fn with_fixed_output(mut self, output: f64) -> Self {
        Arc::make_mut(&mut self.config).fixed_output = Some(output);
        self
    }

    /// Declare a trained width; calls with another width fail.
    pub fn with_n_features(mut self, n: usize) -> Self {
        Arc::make_mut(&mut self.config).n_features = Some(n);
        self
    }

    /// Fail every call with an inference error.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).fail_with = Some(message.into());
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

impl Default for MockRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Regressor for MockRegressor {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        self.call_log.lock().unwrap().push(MockCall {
            features: features.to_vec(),
            timestamp: std::time::Instant::now(),
        });

        if let Some(message) = &self.config.fail_with {
            return Err(Error::Inference(message.clone()));
        }
        if let Some(n) = self.config.n_features {
            if n != features.len() {
                return Err(Error::Inference(format!(
                    "shape mismatch: model expects {} features, got {}",
                    n,
                    features.len()
                )));
            }
        }
        Ok(self
            .config
            .fixed_output
            .unwrap_or_else(|| self.config.bias + features.iter().sum::<f64>()))
    }

    fn model_type(&self) -> &str {
        "Mock"
    }

    fn n_features(&self) -> Option<usize> {
        self.config.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_sums_features() {
        let model = MockRegressor::new().with_bias(1.0);
        assert_eq!(model.predict(&[2.0, 3.0]).unwrap(), 6.0);
        assert_eq!(model.call_count(), 1);
        assert_eq!(model.get_calls()[0].features, vec![2.0, 3.0]);
    }

    #[test]
    fn test_mock_failure() {
        let model = MockRegressor::new().with_failure("boom");
        let err = model.predict(&[1.0]).unwrap_err();
        assert_eq!(err.to_string(), "Inference error: boom");
        assert_eq!(model.call_count(), 1);
    }

    #[test]
    fn test_mock_clones_share_log() {
        let model = MockRegressor::new().with_fixed_output(42.0);
        let clone = model.clone();
        clone.predict(&[]).unwrap();
        assert_eq!(model.call_count(), 1);
    }
}
