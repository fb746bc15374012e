//! Trained regression models.
//!
//! The pipeline treats the model as an opaque function from a feature slice
//! to a scalar. [`Regressor`] is that seam; [`ModelArtifact`] is the JSON
//! form the training pipeline exports, tagged by `"type"`:
//!
//! ```json
//! {"type": "linear", "intercept": 5.0, "coefficients": [1.2, 0.4]}
//! {"type": "random_forest", "trees": [{"nodes": [...]}]}
//! {"type": "gradient_boosting", "base_score": 12.0, "learning_rate": 0.1, "trees": [...]}
//! ```
//!
//! Tree nodes are either splits (`feature`, `threshold`, `left`, `right`)
//! or leaves (`value`). A sample goes left when its feature value is
//! `<= threshold`. Node 0 is the root and children always follow their
//! parent, which rules out cycles.

use serde::Deserialize;

use salary_core::{Error, Result};

/// An already-fitted model.
///
/// Implementations are immutable after construction, so a single instance
/// serves concurrent requests without locking.
pub trait Regressor: Send + Sync {
    /// Predict a single sample.
    fn predict(&self, features: &[f64]) -> Result<f64>;

    /// Model family name reported in diagnostics.
    fn model_type(&self) -> &str;

    /// Input width the model was trained on, when it is known.
    fn n_features(&self) -> Option<usize>;
}

// =============================================================================
// ARTIFACT FORMAT
// =============================================================================

/// Serialized model as exported by the training pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
        #[serde(default)]
        n_features: Option<usize>,
    },
    RandomForest {
        trees: Vec<Tree>,
        #[serde(default)]
        n_features: Option<usize>,
    },
    GradientBoosting {
        #[serde(default)]
        base_score: f64,
        #[serde(default = "default_learning_rate")]
        learning_rate: f64,
        trees: Vec<Tree>,
        #[serde(default)]
        n_features: Option<usize>,
    },
}

fn default_learning_rate() -> f64 {
    1.0
}

impl ModelArtifact {
    /// Validate the artifact and build the matching regressor.
    pub fn into_regressor(self) -> Result<Box<dyn Regressor>> {
        match self {
            Self::Linear {
                intercept,
                coefficients,
                n_features,
            } => Ok(Box::new(LinearRegressor::new(
                intercept,
                coefficients,
                n_features,
            )?)),
            Self::RandomForest { trees, n_features } => Ok(Box::new(TreeEnsemble::new(
                EnsembleKind::Average,
                trees,
                n_features,
            )?)),
            Self::GradientBoosting {
                base_score,
                learning_rate,
                trees,
                n_features,
            } => Ok(Box::new(TreeEnsemble::new(
                EnsembleKind::Boosted {
                    base_score,
                    learning_rate,
                },
                trees,
                n_features,
            )?)),
        }
    }
}

fn check_width(expected: Option<usize>, got: usize) -> Result<()> {
    match expected {
        Some(n) if n != got => Err(Error::Inference(format!(
            "shape mismatch: model expects {} features, got {}",
            n, got
        ))),
        _ => Ok(()),
    }
}

fn require_finite(value: f64, what: &str) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::ArtifactLoad(format!("{} must be finite", what)))
    }
}

// =============================================================================
// LINEAR
// =============================================================================

/// `intercept + Σ coefficient_i * x_i`
#[derive(Debug, Clone)]
pub struct LinearRegressor {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearRegressor {
    pub fn new(intercept: f64, coefficients: Vec<f64>, n_features: Option<usize>) -> Result<Self> {
        require_finite(intercept, "intercept")?;
        if let Some(i) = coefficients.iter().position(|c| !c.is_finite()) {
            return Err(Error::ArtifactLoad(format!(
                "coefficient {} must be finite",
                i
            )));
        }
        if let Some(n) = n_features {
            if n != coefficients.len() {
                return Err(Error::ArtifactLoad(format!(
                    "linear model declares {} features but has {} coefficients",
                    n,
                    coefficients.len()
                )));
            }
        }
        Ok(Self {
            intercept,
            coefficients,
        })
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        check_width(Some(self.coefficients.len()), features.len())?;
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>())
    }

    fn model_type(&self) -> &str {
        "LinearRegression"
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }
}

// =============================================================================
// TREES
// =============================================================================

/// A decision tree node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A decision tree stored as a flat node array rooted at index 0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    fn validate(&self, tree_index: usize, n_features: Option<usize>) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::ArtifactLoad(format!("tree {} has no nodes", tree_index)));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    for child in [left, right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(Error::ArtifactLoad(format!(
                                "tree {} node {} has invalid child {}",
                                tree_index, i, child
                            )));
                        }
                    }
                    if let Some(n) = n_features {
                        if feature >= n {
                            return Err(Error::ArtifactLoad(format!(
                                "tree {} node {} splits on feature {} of {}",
                                tree_index, i, feature, n
                            )));
                        }
                    }
                    require_finite(threshold, "split threshold")?;
                }
                TreeNode::Leaf { value } => require_finite(value, "leaf value")?,
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf.
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Leaf { value } => return Ok(value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = *features.get(feature).ok_or_else(|| {
                        Error::Inference(format!(
                            "shape mismatch: split on feature {} but vector has {}",
                            feature,
                            features.len()
                        ))
                    })?;
                    index = if x <= threshold { left } else { right };
                }
            }
        }
    }
}

/// How tree outputs combine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnsembleKind {
    /// Mean of tree outputs (random forest).
    Average,
    /// `base_score + learning_rate * Σ tree outputs` (gradient boosting).
    Boosted { base_score: f64, learning_rate: f64 },
}

/// Forest or boosted ensemble of decision trees.
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    kind: EnsembleKind,
    trees: Vec<Tree>,
    n_features: Option<usize>,
}

impl TreeEnsemble {
    pub fn new(kind: EnsembleKind, trees: Vec<Tree>, n_features: Option<usize>) -> Result<Self> {
        if trees.is_empty() {
            return Err(Error::ArtifactLoad("tree ensemble has no trees".to_string()));
        }
        if let EnsembleKind::Boosted {
            base_score,
            learning_rate,
        } = kind
        {
            require_finite(base_score, "base_score")?;
            require_finite(learning_rate, "learning_rate")?;
        }
        for (i, tree) in trees.iter().enumerate() {
            tree.validate(i, n_features)?;
        }
        Ok(Self {
            kind,
            trees,
            n_features,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Regressor for TreeEnsemble {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        check_width(self.n_features, features.len())?;
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict(features)?;
        }
        Ok(match self.kind {
            EnsembleKind::Average => sum / self.trees.len() as f64,
            EnsembleKind::Boosted {
                base_score,
                learning_rate,
            } => base_score + learning_rate * sum,
        })
    }

    fn model_type(&self) -> &str {
        match self.kind {
            EnsembleKind::Average => "RandomForest",
            EnsembleKind::Boosted { .. } => "GradientBoosting",
        }
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features
    }
}
