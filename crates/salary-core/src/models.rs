//! Request, feature and result types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::defaults;
use crate::error::{Error, Result};

// =============================================================================
// RAW INPUT
// =============================================================================

/// Experience as submitted: a bracket label or a number of years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExperienceValue {
    Years(f64),
    Label(String),
}

impl fmt::Display for ExperienceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Years(years) => write!(f, "{}", years),
            Self::Label(label) => write!(f, "{}", label),
        }
    }
}

/// A numeric request field that may arrive as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    /// Coerce to a finite float, naming the field in the error.
    pub fn to_f64(&self, field: &str) -> Result<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                Error::Encoding(format!("{} must be numeric, got '{}'", field, s))
            })?,
        };
        if !value.is_finite() {
            return Err(Error::Encoding(format!("{} must be finite", field)));
        }
        Ok(value)
    }
}

/// Loosely-structured job attributes as received from a client.
///
/// No field is required for encoding; an absent field leaves its feature
/// group at zero. The HTTP layer applies its own required-field policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInputRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_fields: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<NumericField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<NumericField>,
}

impl RawInputRecord {
    /// Names of required fields that are absent.
    ///
    /// A field is present once its key was supplied, even with an empty
    /// value; the check mirrors key membership.
    pub fn missing_required(&self) -> Vec<&'static str> {
        defaults::REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| match *field {
                "job_title" => self.job_title.is_none(),
                "city" => self.city.is_none(),
                "experience" => self.experience.is_none(),
                "position_level" => self.position_level.is_none(),
                _ => false,
            })
            .collect()
    }
}

// =============================================================================
// FEATURE VECTOR
// =============================================================================

/// Dense numeric vector aligned 1:1 with a feature schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// All-zero vector of the given width.
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn set(&mut self, index: usize, value: f64) {
        self.0[index] = value;
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

// =============================================================================
// MODEL METADATA
// =============================================================================

/// Metadata recorded by the training pipeline next to the model.
///
/// Every field is optional; consumers apply the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub test_mae: Option<f64>,
    #[serde(default)]
    pub test_rmse: Option<f64>,
    #[serde(default)]
    pub test_r2: Option<f64>,
    #[serde(default)]
    pub best_params: Option<BTreeMap<String, JsonValue>>,
}

impl ModelMetadata {
    /// MAE used to size the confidence interval; 0 when unknown, negative
    /// or non-finite.
    pub fn mae(&self) -> f64 {
        self.test_mae
            .filter(|mae| mae.is_finite() && *mae >= 0.0)
            .unwrap_or(0.0)
    }

    /// R² echoed in prediction results; 0 when unknown.
    pub fn r2(&self) -> f64 {
        self.test_r2.unwrap_or(0.0)
    }

    /// Model type label; "N/A" when unknown.
    pub fn model_type_or_na(&self) -> &str {
        self.model_type
            .as_deref()
            .unwrap_or(defaults::NOT_AVAILABLE)
    }
}

/// Serialize `None` as the "N/A" placeholder.
fn serialize_or_na<S>(value: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_str(defaults::NOT_AVAILABLE),
    }
}

/// Diagnostic view of the loaded model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub n_features: usize,
    #[serde(serialize_with = "serialize_or_na")]
    pub test_mae: Option<f64>,
    #[serde(serialize_with = "serialize_or_na")]
    pub test_rmse: Option<f64>,
    #[serde(serialize_with = "serialize_or_na")]
    pub test_r2: Option<f64>,
    pub best_params: BTreeMap<String, JsonValue>,
}

impl ModelInfo {
    pub fn new(metadata: &ModelMetadata, n_features: usize) -> Self {
        Self {
            model_type: metadata.model_type_or_na().to_string(),
            n_features,
            test_mae: metadata.test_mae,
            test_rmse: metadata.test_rmse,
            test_r2: metadata.test_r2,
            best_params: metadata.best_params.clone().unwrap_or_default(),
        }
    }
}

// =============================================================================
// PREDICTION RESULT
// =============================================================================

/// Coarse salary bucket, in million VND.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryCategory {
    Low,
    LowerMiddle,
    UpperMiddle,
    High,
}

impl SalaryCategory {
    /// Closed-open buckets: `<10`, `[10,20)`, `[20,30)`, `>=30`.
    pub fn from_prediction(prediction: f64) -> Self {
        if prediction < defaults::CATEGORY_LOW_MAX {
            Self::Low
        } else if prediction < defaults::CATEGORY_MID_LOW_MAX {
            Self::LowerMiddle
        } else if prediction < defaults::CATEGORY_MID_HIGH_MAX {
            Self::UpperMiddle
        } else {
            Self::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Thấp",
            Self::LowerMiddle => "Trung bình thấp",
            Self::UpperMiddle => "Trung bình cao",
            Self::High => "Cao",
        }
    }
}

impl fmt::Display for SalaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SalaryCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Symmetric band around the prediction, lower bound clamped at 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub lower_formatted: String,
    pub upper_formatted: String,
}

/// Model quality figures echoed with each prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultModelInfo {
    pub mae: f64,
    pub r2: f64,
    pub model_type: String,
}

/// Summary of the input as given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSummary {
    pub experience_years: ExperienceValue,
    pub position: String,
    pub city: String,
    pub skills_count: usize,
}

/// Human-facing prediction result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub predicted_salary: f64,
    pub predicted_salary_formatted: String,
    pub confidence_interval: ConfidenceInterval,
    pub salary_category: SalaryCategory,
    pub model_info: ResultModelInfo,
    pub input_summary: InputSummary,
}
