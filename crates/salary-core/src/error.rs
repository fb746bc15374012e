//! Error types for salary-predict.

use thiserror::Error;

/// Result type alias using salary-predict's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for salary-predict operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A required artifact (model, feature schema) is missing or corrupt.
    /// Only raised at startup.
    #[error("Artifact load error: {0}")]
    ArtifactLoad(String),

    /// A request field could not be coerced into its numeric meaning.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The predictor failed to initialize; permanent until restart.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// The wrapped model failed while predicting.
    #[error("Inference error: {0}")]
    Inference(String),

    /// Request-level validation failure (missing fields, batch size).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Whether the failure is scoped to a single request.
    ///
    /// Per-request errors are reported to the caller and never touch shared
    /// state. Everything else reflects how the process was started.
    pub fn is_per_request(&self) -> bool {
        matches!(
            self,
            Error::Encoding(_) | Error::Inference(_) | Error::InvalidInput(_)
        )
    }

    /// No operation in this crate is retried; retries belong to the caller.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_artifact_load() {
        let err = Error::ArtifactLoad("best_model.json not found".to_string());
        assert_eq!(
            err.to_string(),
            "Artifact load error: best_model.json not found"
        );
    }

    #[test]
    fn test_error_display_encoding() {
        let err = Error::Encoding("experience is not a number".to_string());
        assert_eq!(err.to_string(), "Encoding error: experience is not a number");
    }

    #[test]
    fn test_error_display_model_unavailable() {
        let err = Error::ModelUnavailable("startup failed".to_string());
        assert_eq!(err.to_string(), "Model unavailable: startup failed");
    }

    #[test]
    fn test_error_display_inference() {
        let err = Error::Inference("shape mismatch".to_string());
        assert_eq!(err.to_string(), "Inference error: shape mismatch");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("missing city".to_string());
        assert_eq!(err.to_string(), "Invalid input: missing city");
    }

    #[test]
    fn test_per_request_classification() {
        assert!(Error::Encoding("x".into()).is_per_request());
        assert!(Error::Inference("x".into()).is_per_request());
        assert!(Error::InvalidInput("x".into()).is_per_request());
        assert!(!Error::ModelUnavailable("x".into()).is_per_request());
        assert!(!Error::ArtifactLoad("x".into()).is_per_request());
    }

    #[test]
    fn test_nothing_is_retryable() {
        assert!(!Error::ModelUnavailable("x".into()).is_retryable());
        assert!(!Error::Inference("x".into()).is_retryable());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
