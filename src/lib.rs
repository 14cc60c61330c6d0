//! admitui library
//!
//! Core of the BHU admission predictor: the wizard state machine, course
//! catalog, marks handling, prediction clients and the terminal UI.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config_file;
pub mod error;
pub mod input;
pub mod marks;
pub mod prediction;
pub mod theme;
pub mod types;
pub mod ui;
pub mod wizard_state;

// Re-export main types for convenience
pub use config_file::PredictorConfig;
pub use error::AdmitError;
pub use marks::SubjectMarks;
pub use prediction::{
    FakeClient, GeminiClient, PredictionClient, PredictionError, PredictionRequest,
    PredictionResult,
};
pub use types::{AdmissionChance, CampusStatus, Gender, Quota};
pub use wizard_state::{Screen, Selection, WizardController, WizardError, WizardStep};
