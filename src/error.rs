//! Error handling module for admitui
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Concern-specific errors (`WizardError`, `PredictionError`, `MarksError`) live
//! next to the code that raises them and convert into `AdmitError` here.

use thiserror::Error;

use crate::marks::MarksError;
use crate::prediction::PredictionError;
use crate::wizard_state::WizardError;

/// Main error type for admitui
#[derive(Error, Debug)]
pub enum AdmitError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (user input, marks, CLI values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Prediction service errors
    #[error("Prediction failed: {0}")]
    Prediction(String),

    /// Wizard state machine transition errors
    #[error("Wizard transition error: {0}")]
    Transition(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for admitui operations
pub type Result<T> = std::result::Result<T, AdmitError>;

// Convenient error constructors
impl AdmitError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}

impl From<WizardError> for AdmitError {
    fn from(err: WizardError) -> Self {
        AdmitError::Transition(err.to_string())
    }
}

impl From<PredictionError> for AdmitError {
    fn from(err: PredictionError) -> Self {
        AdmitError::Prediction(err.to_string())
    }
}

impl From<MarksError> for AdmitError {
    fn from(err: MarksError) -> Self {
        AdmitError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AdmitError::config("timeout must be positive");
        assert_eq!(err.to_string(), "Configuration error: timeout must be positive");

        let err = AdmitError::validation("Physics score is not a number");
        assert_eq!(err.to_string(), "Validation error: Physics score is not a number");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AdmitError = io_err.into();
        assert!(matches!(err, AdmitError::Io(_)));
    }

    #[test]
    fn test_prediction_error_keeps_message() {
        let err: AdmitError = PredictionError::Service("network unreachable".into()).into();
        assert_eq!(err.to_string(), "Prediction failed: network unreachable");
    }

    #[test]
    fn test_wizard_error_conversion() {
        let err: AdmitError = WizardError::RequestInFlight.into();
        assert!(matches!(err, AdmitError::Transition(_)));
    }
}
