//! End-to-end wizard flows against the deterministic prediction client
//!
//! These tests verify:
//! - The full happy path to a result
//! - Failure handling and the error panel
//! - Back navigation and reset
//! - The missing-selection guard on submit

use admitui::prediction::fake::sample_result;
use admitui::{
    FakeClient, PredictionError, Screen, Selection, SubjectMarks, WizardController, WizardError,
    WizardStep,
};

fn marks() -> SubjectMarks {
    SubjectMarks::from_pairs([("Physics", 85.0), ("Chemistry", 78.0), ("Math", 92.0)])
        .expect("valid marks")
}

fn at_marks_step() -> WizardController {
    let mut wizard = WizardController::new();
    wizard.select_course("B.Tech CSE").unwrap();
    wizard.select_quota("general").unwrap();
    wizard.select_gender("male").unwrap();
    assert_eq!(wizard.step(), WizardStep::MarksInput);
    wizard
}

// =============================================================================
// Happy path and failure
// =============================================================================

#[test]
fn test_full_flow_reaches_result() {
    let mut wizard = at_marks_step();
    let client = FakeClient::succeeding(sample_result("B.Tech CSE", 255.0));

    let step = wizard.submit_with(&client, marks()).unwrap();

    assert_eq!(step, WizardStep::Result);
    assert_eq!(wizard.screen(), Screen::Step(WizardStep::Result));
    assert_eq!(wizard.prediction().map(|r| r.total_score), Some(255.0));
    assert!(wizard.error_message().is_none());
    assert!(!wizard.is_loading());
}

#[test]
fn test_request_carries_selection_and_marks() {
    let mut wizard = at_marks_step();
    let client = FakeClient::succeeding(sample_result("B.Tech CSE", 255.0));
    wizard.submit_with(&client, marks()).unwrap();

    let request = client.last_request().expect("one request");
    assert_eq!(request.course, "B.Tech CSE");
    assert_eq!(request.quota, "general");
    assert_eq!(request.gender, "male");
    assert_eq!(request.marks.total(), 255.0);
    assert_eq!(client.calls(), 1);
}

#[test]
fn test_transport_failure_shows_error() {
    let mut wizard = at_marks_step();
    let client = FakeClient::failing(PredictionError::Service("network unreachable".into()));

    let step = wizard.submit_with(&client, marks()).unwrap();

    assert_eq!(step, WizardStep::Error);
    assert_eq!(wizard.error_message(), Some("network unreachable"));
    assert!(wizard.prediction().is_none());
    assert_eq!(wizard.screen(), Screen::ErrorPanel);
}

#[test]
fn test_malformed_response_is_reported_like_any_failure() {
    let mut wizard = at_marks_step();
    let client = FakeClient::failing(PredictionError::MalformedResponse(
        "missing field `totalScore`".into(),
    ));

    wizard.submit_with(&client, marks()).unwrap();

    assert_eq!(wizard.step(), WizardStep::Error);
    assert_eq!(wizard.error_message(), Some("missing field `totalScore`"));
}

#[test]
fn test_start_over_after_failure() {
    let mut wizard = at_marks_step();
    let client = FakeClient::failing(PredictionError::Service("network unreachable".into()));
    wizard.submit_with(&client, marks()).unwrap();

    wizard.reset();

    assert_eq!(wizard.step(), WizardStep::CourseSelection);
    assert_eq!(wizard.selection(), &Selection::default());
    assert!(wizard.error_message().is_none());
    assert_eq!(wizard.screen(), Screen::Step(WizardStep::CourseSelection));
}

// =============================================================================
// Asynchronous completion
// =============================================================================

#[test]
fn test_outstanding_request_blocks_other_events() {
    let mut wizard = at_marks_step();
    let pending = wizard.submit_marks(marks()).unwrap();

    assert_eq!(wizard.screen(), Screen::Loading);
    assert!(wizard.back_targets().is_empty());
    assert!(matches!(
        wizard.back(WizardStep::CourseSelection),
        Err(WizardError::RequestInFlight)
    ));
    assert!(matches!(
        wizard.submit_marks(marks()),
        Err(WizardError::RequestInFlight)
    ));

    wizard
        .complete_prediction(pending.ticket, Ok(sample_result("B.Tech CSE", 255.0)))
        .unwrap();
    assert_eq!(wizard.step(), WizardStep::Result);
}

#[test]
fn test_reset_discards_late_completion() {
    let mut wizard = at_marks_step();
    let pending = wizard.submit_marks(marks()).unwrap();
    wizard.reset();

    let late = wizard.complete_prediction(pending.ticket, Ok(sample_result("B.Tech CSE", 255.0)));

    assert!(matches!(late, Err(WizardError::UnknownRequest { .. })));
    assert_eq!(wizard.step(), WizardStep::CourseSelection);
    assert!(wizard.prediction().is_none());
}

// =============================================================================
// Back navigation
// =============================================================================

#[test]
fn test_back_to_quota_keeps_course() {
    let mut wizard = at_marks_step();
    wizard.back(WizardStep::QuotaSelection).unwrap();

    assert_eq!(wizard.step(), WizardStep::QuotaSelection);
    assert_eq!(wizard.selection().course.as_deref(), Some("B.Tech CSE"));
    assert!(wizard.selection().quota.is_none());
    assert!(wizard.selection().gender.is_none());
}

#[test]
fn test_back_then_forward_again() {
    let mut wizard = at_marks_step();
    wizard.back(WizardStep::GenderSelection).unwrap();
    wizard.select_gender("female").unwrap();

    assert_eq!(wizard.step(), WizardStep::MarksInput);
    assert_eq!(wizard.selection().gender.as_deref(), Some("female"));
}

#[test]
fn test_back_cannot_move_forward() {
    let mut wizard = WizardController::new();
    wizard.select_course("B.Tech CSE").unwrap();

    let err = wizard.back(WizardStep::MarksInput).unwrap_err();
    assert!(matches!(err, WizardError::InvalidTransition { .. }));
    assert_eq!(wizard.step(), WizardStep::QuotaSelection);
}

// =============================================================================
// Missing selection guard
// =============================================================================

#[test]
fn test_submit_with_missing_gender_is_rejected() {
    let mut wizard = WizardController::from_parts(
        WizardStep::MarksInput,
        Selection {
            course: Some("B.Tech CSE".into()),
            quota: Some("general".into()),
            gender: None,
        },
    );
    let client = FakeClient::succeeding(sample_result("B.Tech CSE", 255.0));

    let err = wizard.submit_with(&client, marks()).unwrap_err();

    assert!(matches!(err, WizardError::MissingSelection { .. }));
    assert_eq!(wizard.step(), WizardStep::MarksInput);
    assert_eq!(
        wizard.error_message(),
        Some("No course, quota, or gender selected. Please go back.")
    );
    assert_eq!(client.calls(), 0);
}
