//! # salary-core
//!
//! Core types, vocabularies and abstractions for the salary-predict service.
//!
//! This crate provides the foundational data structures that the inference
//! pipeline and the HTTP API depend on:
//! - The error taxonomy shared by every layer
//! - The Feature Schema (ordered, named feature columns)
//! - Vocabulary Tables (experience brackets, position ranks)
//! - Comma-list tokenization shared by encoding and result composition
//! - Request and response data model

pub mod defaults;
pub mod error;
pub mod models;
pub mod schema;
pub mod tokenize;
pub mod vocab;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use schema::FeatureSchema;
pub use tokenize::{tokenize_list, TermList};
pub use vocab::Vocabulary;
