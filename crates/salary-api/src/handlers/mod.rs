//! HTTP handlers for salary-api.

pub mod info;
pub mod predict;
