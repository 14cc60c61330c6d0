//! Admission prediction
//!
//! The prediction itself is delegated to an external AI completion service.
//! This module owns the request/response contract with that service:
//!
//! - `PredictionClient` - capability trait the wizard calls through
//! - `gemini` - the real HTTP client
//! - `fake` - deterministic stand-in for tests
//! - `prompt` - builds the instruction text sent to the service
//! - `parse` - turns the service's text back into a `PredictionResult`
//! - `report` - plain-text rendering of a result for headless output

pub mod fake;
pub mod gemini;
pub mod parse;
pub mod prompt;
pub mod report;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::marks::SubjectMarks;
use crate::types::{AdmissionChance, CampusStatus};

pub use fake::FakeClient;
pub use gemini::GeminiClient;
pub use parse::parse_prediction;

/// Failures of a prediction call.
///
/// `Display` is the bare human-readable message; it is what the wizard shows
/// in its error panel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictionError {
    /// Network/transport failure reaching the service
    #[error("{0}")]
    Service(String),

    /// The service answered with something that does not fit `PredictionResult`
    #[error("{0}")]
    MalformedResponse(String),

    /// Required inputs missing or unusable
    #[error("{0}")]
    Validation(String),
}

impl PredictionError {
    /// Short name of the failure kind, for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Service(_) => "service",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Validation(_) => "validation",
        }
    }
}

/// Everything the service needs for one admission attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub course: String,
    pub quota: String,
    pub gender: String,
    pub marks: SubjectMarks,
}

impl PredictionRequest {
    /// Check the inputs before any network traffic.
    pub fn validate(&self) -> Result<(), PredictionError> {
        for (field, value) in [
            ("course", &self.course),
            ("quota", &self.quota),
            ("gender", &self.gender),
        ] {
            if value.trim().is_empty() {
                return Err(PredictionError::Validation(format!(
                    "A {} must be selected before requesting a prediction.",
                    field
                )));
            }
        }
        if self.marks.is_empty() {
            return Err(PredictionError::Validation(
                "Enter marks for at least one subject.".to_string(),
            ));
        }
        if let Some((subject, _)) = self.marks.iter().find(|(_, score)| !score.is_finite()) {
            return Err(PredictionError::Validation(format!(
                "Marks for {} are not a valid number.",
                subject
            )));
        }
        Ok(())
    }
}

/// Outlook for a single campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusPrediction {
    pub campus_name: String,
    pub previous_cutoff: String,
    pub possible_round: String,
    pub admission_chance: AdmissionChance,
    pub status: CampusStatus,
}

/// Narrative analysis block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAnalysis {
    /// Probability estimate in percent (0..=100)
    pub predicted_admission_probability: f64,
    pub recommended_campus: String,
    #[serde(default)]
    pub alternative_options: Vec<String>,
    #[serde(default)]
    pub improvement_areas: Vec<String>,
}

/// The full admission-chance report.
///
/// Only ever produced by a successful prediction call; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    #[serde(default)]
    pub course_selected: String,
    pub total_score: f64,
    pub campus_predictions: Vec<CampusPrediction>,
    pub detailed_analysis: DetailedAnalysis,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Capability interface for reaching the prediction service.
///
/// Implementations are called from a worker thread, hence `Send + Sync`.
/// No retries are performed by callers.
pub trait PredictionClient: Send + Sync {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError>;
}
