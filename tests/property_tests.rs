//! Property-based tests for the wizard state machine
//!
//! These tests verify, for arbitrary event sequences:
//! - Back navigation clears exactly the selections captured at or after the target
//! - Reset always lands on a clean first step, and resetting twice changes nothing
//! - While a request is outstanding only reset and completion are accepted
//! - Selections never outrun the step that captures them

use admitui::prediction::fake::sample_result;
use admitui::wizard_state::{back_targets, SelectionField};
use admitui::{Selection, SubjectMarks, WizardController, WizardError, WizardStep};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

#[derive(Debug, Clone)]
enum Action {
    Course(String),
    Quota(String),
    Gender(String),
    Submit,
    Succeed,
    Fail(String),
    Back(usize),
    Reset,
}

fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("B.Tech CSE".to_string()),
        Just("general".to_string()),
        Just("female".to_string()),
        "[a-z]{1,8}",
    ]
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        value_strategy().prop_map(Action::Course),
        value_strategy().prop_map(Action::Quota),
        value_strategy().prop_map(Action::Gender),
        Just(Action::Submit),
        Just(Action::Succeed),
        "[a-z ]{1,20}".prop_map(Action::Fail),
        (0usize..3).prop_map(Action::Back),
        Just(Action::Reset),
    ]
}

fn marks() -> SubjectMarks {
    SubjectMarks::from_pairs([("Physics", 85.0), ("Math", 92.0)]).expect("valid marks")
}

/// Apply one action, completing outstanding requests through their ticket.
fn apply(wizard: &mut WizardController, action: &Action) {
    match action {
        Action::Course(v) => {
            let _ = wizard.select_course(v.clone());
        }
        Action::Quota(v) => {
            let _ = wizard.select_quota(v.clone());
        }
        Action::Gender(v) => {
            let _ = wizard.select_gender(v.clone());
        }
        Action::Submit => {
            let _ = wizard.submit_marks(marks());
        }
        Action::Succeed => {
            if let Some(ticket) = wizard.in_flight() {
                let _ = wizard.complete_prediction(ticket, Ok(sample_result("B.Tech CSE", 177.0)));
            }
        }
        Action::Fail(msg) => {
            if let Some(ticket) = wizard.in_flight() {
                let _ = wizard.complete_prediction(
                    ticket,
                    Err(admitui::PredictionError::Service(msg.clone())),
                );
            }
        }
        Action::Back(i) => {
            let targets = wizard.back_targets();
            if let Some(target) = targets.get(*i) {
                let _ = wizard.back(*target);
            }
        }
        Action::Reset => wizard.reset(),
    }
}

fn is_clean(wizard: &WizardController) -> bool {
    wizard.step() == WizardStep::CourseSelection
        && wizard.selection() == &Selection::default()
        && wizard.error_message().is_none()
        && wizard.prediction().is_none()
        && !wizard.is_loading()
}

proptest! {
    /// Back clears exactly the fields captured at or after the target step
    #[test]
    fn back_clears_exactly_downstream_fields(
        actions in prop::collection::vec(action_strategy(), 0..30),
        pick in 0usize..3,
    ) {
        let mut wizard = WizardController::new();
        for action in &actions {
            apply(&mut wizard, action);
        }
        let targets = wizard.back_targets();
        prop_assume!(!targets.is_empty());
        let target = targets[pick % targets.len()];

        let before = wizard.selection().clone();
        wizard.back(target).expect("listed back target is legal");

        prop_assert_eq!(wizard.step(), target);
        prop_assert!(wizard.error_message().is_none());
        for field in [SelectionField::Course, SelectionField::Quota, SelectionField::Gender] {
            let after = wizard.selection().get(field);
            if field.captured_at().order() >= target.order() {
                prop_assert!(after.is_none(), "{:?} should be cleared", field);
            } else {
                prop_assert_eq!(after, before.get(field));
            }
        }
    }

    /// Reset from anywhere yields the initial state; a second reset is a no-op
    #[test]
    fn reset_is_total_and_idempotent(actions in prop::collection::vec(action_strategy(), 0..30)) {
        let mut wizard = WizardController::new();
        for action in &actions {
            apply(&mut wizard, action);
        }
        wizard.reset();
        prop_assert!(is_clean(&wizard));
        let once = wizard.clone();
        wizard.reset();
        prop_assert_eq!(wizard, once);
    }

    /// With a request outstanding, navigation and submission are refused
    #[test]
    fn in_flight_guard_holds(
        course in value_strategy(),
        quota in value_strategy(),
        gender in value_strategy(),
        target in 0usize..3,
    ) {
        let mut wizard = WizardController::new();
        wizard.select_course(course).unwrap();
        wizard.select_quota(quota).unwrap();
        wizard.select_gender(gender).unwrap();
        let pending = wizard.submit_marks(marks()).unwrap();
        let step = wizard.step();
        let selection = wizard.selection().clone();

        let back_to = back_targets(WizardStep::MarksInput)[target];
        prop_assert!(matches!(wizard.back(back_to), Err(WizardError::RequestInFlight)));
        prop_assert!(matches!(wizard.select_course("x"), Err(WizardError::RequestInFlight)));
        prop_assert!(matches!(wizard.submit_marks(marks()), Err(WizardError::RequestInFlight)));
        prop_assert_eq!(wizard.step(), step);
        prop_assert_eq!(wizard.selection(), &selection);
        prop_assert_eq!(wizard.in_flight(), Some(pending.ticket));
    }

    /// A field is only set once the step that captures it has been passed
    #[test]
    fn selections_never_outrun_the_step(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let mut wizard = WizardController::new();
        for action in &actions {
            apply(&mut wizard, action);
            let step = wizard.step();
            if step.is_input_step() {
                for field in [SelectionField::Course, SelectionField::Quota, SelectionField::Gender] {
                    if field.captured_at().order() >= step.order() {
                        prop_assert!(wizard.selection().get(field).is_none());
                    }
                }
            }
        }
    }
}
