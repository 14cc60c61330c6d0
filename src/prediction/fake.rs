//! Deterministic prediction client.
//!
//! Answers every call with a canned outcome so the wizard can be driven
//! without the external service.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{
    CampusPrediction, DetailedAnalysis, PredictionClient, PredictionError, PredictionRequest,
    PredictionResult,
};
use crate::types::{AdmissionChance, CampusStatus};

/// Prediction client returning a fixed outcome.
#[derive(Debug)]
pub struct FakeClient {
    outcome: Result<PredictionResult, PredictionError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_request: Mutex<Option<PredictionRequest>>,
}

impl FakeClient {
    /// Always succeed with `result`.
    pub fn succeeding(result: PredictionResult) -> Self {
        Self::with_outcome(Ok(result))
    }

    /// Always fail with `error`.
    pub fn failing(error: PredictionError) -> Self {
        Self::with_outcome(Err(error))
    }

    pub fn with_outcome(outcome: Result<PredictionResult, PredictionError>) -> Self {
        Self {
            outcome,
            delay: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Sleep this long before answering, to simulate service latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `predict` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<PredictionRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

impl PredictionClient for FakeClient {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.outcome.clone()
    }
}

/// A plausible result whose total matches `total_score`.
pub fn sample_result(course: &str, total_score: f64) -> PredictionResult {
    PredictionResult {
        course_selected: course.to_string(),
        total_score,
        campus_predictions: vec![
            CampusPrediction {
                campus_name: "Main Campus, Varanasi".to_string(),
                previous_cutoff: "248".to_string(),
                possible_round: "Round 1".to_string(),
                admission_chance: AdmissionChance::High,
                status: CampusStatus::Likely,
            },
            CampusPrediction {
                campus_name: "Rajiv Gandhi South Campus, Barkachha".to_string(),
                previous_cutoff: "262".to_string(),
                possible_round: "Round 3".to_string(),
                admission_chance: AdmissionChance::Medium,
                status: CampusStatus::Borderline,
            },
        ],
        detailed_analysis: DetailedAnalysis {
            predicted_admission_probability: 72.0,
            recommended_campus: "Main Campus, Varanasi".to_string(),
            alternative_options: vec!["B.Sc. (Hons.) Math Group".to_string()],
            improvement_areas: vec!["Chemistry".to_string()],
        },
        recommendations: vec!["Fill choices for both campuses in round 1.".to_string()],
    }
}
