//! Feature schema: the ordered, named feature columns a trained model expects.
//!
//! The model has no notion of column names, only positions, so every vector
//! handed to it must follow this exact order. Slot lookups go through a
//! name → index map built once when the schema is constructed.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

/// Ordered list of unique feature names with an index for slot lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Build a schema from ordered names.
    ///
    /// Fails with [`Error::ArtifactLoad`] on empty or duplicate names, since
    /// either would make slot assignment ambiguous.
    pub fn new(names: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(Error::ArtifactLoad(format!(
                    "feature schema has an empty name at position {}",
                    position
                )));
            }
            if let Some(first) = index.insert(name.clone(), position) {
                return Err(Error::ArtifactLoad(format!(
                    "feature schema repeats '{}' at positions {} and {}",
                    name, first, position
                )));
            }
        }
        Ok(Self { names, index })
    }

    /// Parse a schema from a JSON array of strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let names: Vec<String> = serde_json::from_str(json).map_err(|e| {
            Error::ArtifactLoad(format!("feature schema is not a JSON string array: {}", e))
        })?;
        Self::new(names)
    }

    /// Load a schema from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::ArtifactLoad(format!(
                "failed to read feature schema {}: {}",
                path.display(),
                e
            ))
        })?;
        let schema = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            n_features = schema.len(),
            "Feature schema loaded"
        );
        Ok(schema)
    }

    /// Index of a named slot, if the schema defines it.
    #[inline]
    pub fn slot(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
