//! The loaded prediction pipeline: encoder → engine → composer.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use salary_core::{
    FeatureSchema, FeatureVector, ModelInfo, ModelMetadata, PredictionResult, RawInputRecord,
    Result, Vocabulary,
};

use crate::artifacts;
use crate::composer::compose;
use crate::config::PredictorConfig;
use crate::encoder::FeatureEncoder;
use crate::engine::InferenceEngine;
use crate::regressor::Regressor;
use crate::scaler::StandardScaler;

/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug)]
pub struct Predictor {
    encoder: FeatureEncoder,
    engine: InferenceEngine,
    scaler: Option<StandardScaler>,
    metadata: ModelMetadata,
    loaded_at: DateTime<Utc>,
}

impl Predictor {
    /// Load every artifact named by `config`.
    ///
    /// The model and the schema are required. A missing scaler or metadata
    /// file only produces a warning.
    pub fn load(config: &PredictorConfig) -> Result<Self> {
        let start = Instant::now();
        info!(
            model_path = %config.model_path.display(),
            features_path = %config.features_path.display(),
            "Loading predictor artifacts"
        );

        let model = artifacts::load_model(&config.model_path)?;
        let scaler = artifacts::load_scaler(&config.scaler_path);
        let schema = FeatureSchema::from_file(&config.features_path)?;
        let metadata = artifacts::load_metadata(&config.model_info_path);

        let predictor = Self::from_parts(model, schema, scaler, metadata);
        info!(
            model = predictor.engine.model().model_type(),
            n_features = predictor.schema().len(),
            scaler = predictor.has_scaler(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Predictor ready"
        );
        Ok(predictor)
    }

    /// Assemble a predictor from already-loaded parts, using the built-in
    /// vocabulary.
    pub fn from_parts(
        model: Arc<dyn Regressor>,
        schema: FeatureSchema,
        scaler: Option<StandardScaler>,
        metadata: ModelMetadata,
    ) -> Self {
        if let Some(expected) = model.n_features() {
            if expected != schema.len() {
                warn!(
                    model_features = expected,
                    schema_features = schema.len(),
                    "Model and feature schema disagree on width; predictions will fail"
                );
            }
        }
        if let Some(scaler) = &scaler {
            if scaler.n_features() != schema.len() {
                warn!(
                    scaler_features = scaler.n_features(),
                    schema_features = schema.len(),
                    "Scaler and feature schema disagree on width"
                );
            }
        }

        Self {
            encoder: FeatureEncoder::new(
                Arc::new(schema),
                Arc::new(Vocabulary::builtin().clone()),
            ),
            engine: InferenceEngine::new(model),
            scaler,
            metadata,
            loaded_at: Utc::now(),
        }
    }

    pub fn encode(&self, raw: &RawInputRecord) -> Result<FeatureVector> {
        self.encoder.encode(raw)
    }

    /// Encode and run the model, returning the raw prediction.
    pub fn predict(&self, raw: &RawInputRecord) -> Result<f64> {
        let vector = self.encode(raw)?;
        self.engine.predict(&vector)
    }

    /// Full pipeline: encode, predict and compose the result.
    pub fn predict_with_details(&self, raw: &RawInputRecord) -> Result<PredictionResult> {
        let start = Instant::now();
        let prediction = self.predict(raw)?;
        let result = compose(
            prediction,
            &self.metadata,
            self.engine.model().model_type(),
            raw,
        );
        debug!(
            prediction,
            category = result.salary_category.label(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Prediction composed"
        );
        Ok(result)
    }

    /// Predict several records independently. Output order matches input
    /// order; the first failing record fails the batch.
    pub fn predict_batch(&self, records: &[RawInputRecord]) -> Result<Vec<f64>> {
        let vectors = records
            .iter()
            .map(|raw| self.encode(raw))
            .collect::<Result<Vec<_>>>()?;
        self.engine.predict_batch(&vectors)
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo::new(&self.metadata, self.schema().len())
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.encoder.schema()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.encoder.vocabulary()
    }

    /// The scaler is kept for forward compatibility and not applied.
    pub fn has_scaler(&self) -> bool {
        self.scaler.is_some()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}
