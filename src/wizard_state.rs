//! Wizard State Machine
//!
//! Single source of truth for where the user is in the admission wizard and
//! what they have selected so far.
//!
//! # Design Principles
//!
//! - **Declared transitions**: every legal `(step, event)` pair is a row in
//!   [`TRANSITIONS`]; anything not in the table is rejected without touching state
//! - **Declared cascade**: each [`SelectionField`] names the step that captures it,
//!   and rewinding clears every field captured at or after the target step
//! - **Orthogonal flags**: the in-flight request and the error message sit beside
//!   the step and win over it when choosing what to render (loading > error > step)
//!
//! # Step Flow
//!
//! ```text
//! CourseSelection
//!     ↓ select course
//! QuotaSelection
//!     ↓ select quota
//! GenderSelection
//!     ↓ select gender
//! MarksInput ──submit──▶ (request in flight) ──▶ Result | Error
//!
//! Back: any selection step may return to any earlier one.
//! Reset: any step returns to CourseSelection with everything cleared.
//! ```

use std::fmt;
use thiserror::Error;

use crate::marks::SubjectMarks;
use crate::prediction::{PredictionClient, PredictionError, PredictionRequest, PredictionResult};

/// Wizard steps in sequential order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum WizardStep {
    /// Pick a course from the catalog (initial step)
    CourseSelection = 0,
    /// Pick an admission quota
    QuotaSelection = 1,
    /// Pick a gender
    GenderSelection = 2,
    /// Enter subject marks and submit
    MarksInput = 3,
    /// A prediction call failed (terminal, recoverable only via reset)
    Error = 4,
    /// A prediction was received (terminal)
    Result = 5,
}

impl WizardStep {
    /// Returns the numeric order of this step
    #[inline]
    pub const fn order(self) -> u8 {
        self as u8
    }

    /// Returns true for the steps where the user makes a choice or enters data
    #[inline]
    pub const fn is_input_step(self) -> bool {
        matches!(
            self,
            Self::CourseSelection | Self::QuotaSelection | Self::GenderSelection | Self::MarksInput
        )
    }

    /// Returns true if this is a terminal step (Result or Error)
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Result | Self::Error)
    }

    /// Returns a human-readable title for this step
    pub const fn title(self) -> &'static str {
        match self {
            Self::CourseSelection => "Select Your Course",
            Self::QuotaSelection => "Select Your Quota",
            Self::GenderSelection => "Select Your Gender",
            Self::MarksInput => "Enter Your Marks",
            Self::Error => "An Error Occurred",
            Self::Result => "Admission Prediction",
        }
    }

    /// Returns the 1-indexed position among the input steps, if it is one
    pub const fn step_number(self) -> Option<usize> {
        match self {
            Self::CourseSelection => Some(1),
            Self::QuotaSelection => Some(2),
            Self::GenderSelection => Some(3),
            Self::MarksInput => Some(4),
            Self::Error | Self::Result => None,
        }
    }

    /// Number of input steps shown in the step indicator
    pub const INPUT_STEPS: usize = 4;

    /// All steps in order
    pub const fn all_steps() -> &'static [Self] {
        &[
            Self::CourseSelection,
            Self::QuotaSelection,
            Self::GenderSelection,
            Self::MarksInput,
            Self::Error,
            Self::Result,
        ]
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// A field of the accumulated selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionField {
    Course,
    Quota,
    Gender,
}

/// Which step captures which selection field, in capture order.
pub const CAPTURES: &[(SelectionField, WizardStep)] = &[
    (SelectionField::Course, WizardStep::CourseSelection),
    (SelectionField::Quota, WizardStep::QuotaSelection),
    (SelectionField::Gender, WizardStep::GenderSelection),
];

impl SelectionField {
    /// The step at which this field is captured
    pub fn captured_at(self) -> WizardStep {
        CAPTURES
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, step)| *step)
            .unwrap_or(WizardStep::CourseSelection)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Quota => "quota",
            Self::Gender => "gender",
        }
    }
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Selections accumulated while moving through the wizard.
///
/// A field is `Some` only if its step has been completed and not rewound past.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub course: Option<String>,
    pub quota: Option<String>,
    pub gender: Option<String>,
}

impl Selection {
    pub fn get(&self, field: SelectionField) -> Option<&str> {
        match field {
            SelectionField::Course => self.course.as_deref(),
            SelectionField::Quota => self.quota.as_deref(),
            SelectionField::Gender => self.gender.as_deref(),
        }
    }

    fn slot_mut(&mut self, field: SelectionField) -> &mut Option<String> {
        match field {
            SelectionField::Course => &mut self.course,
            SelectionField::Quota => &mut self.quota,
            SelectionField::Gender => &mut self.gender,
        }
    }

    /// Clear every field captured at or after `step`.
    pub fn clear_from(&mut self, step: WizardStep) {
        for (field, captured_at) in CAPTURES {
            if captured_at.order() >= step.order() {
                *self.slot_mut(*field) = None;
            }
        }
    }

    /// Fields that must be present to show `step` but are not.
    pub fn missing_for(&self, step: WizardStep) -> Vec<SelectionField> {
        CAPTURES
            .iter()
            .filter(|(_, captured_at)| captured_at.order() < step.order())
            .filter(|(field, _)| self.get(*field).is_none())
            .map(|(field, _)| *field)
            .collect()
    }

    /// True when course, quota and gender are all present.
    pub fn is_complete(&self) -> bool {
        CAPTURES.iter().all(|(field, _)| self.get(*field).is_some())
    }
}

/// Payload-free event identity, used as the transition table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SelectCourse,
    SelectQuota,
    SelectGender,
    SubmitMarks,
    Back(WizardStep),
    PredictionSucceeded,
    PredictionFailed,
    Reset,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectCourse => f.write_str("select course"),
            Self::SelectQuota => f.write_str("select quota"),
            Self::SelectGender => f.write_str("select gender"),
            Self::SubmitMarks => f.write_str("submit marks"),
            Self::Back(target) => write!(f, "back to {}", target),
            Self::PredictionSucceeded => f.write_str("prediction succeeded"),
            Self::PredictionFailed => f.write_str("prediction failed"),
            Self::Reset => f.write_str("reset"),
        }
    }
}

/// Side effect attached to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StoreCourse,
    StoreQuota,
    StoreGender,
    /// Issue a prediction request; the step does not change until it completes
    BeginPrediction,
    /// Clear every selection captured at or after the target step
    Rewind,
    StoreResult,
    StoreFailure,
    ClearAll,
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Source step; `None` matches any step
    pub from: Option<WizardStep>,
    pub event: EventKind,
    pub to: WizardStep,
    pub effect: Effect,
}

const fn row(from: WizardStep, event: EventKind, to: WizardStep, effect: Effect) -> Transition {
    Transition {
        from: Some(from),
        event,
        to,
        effect,
    }
}

use EventKind as E;
use WizardStep as S;

/// Every legal transition of the wizard.
pub const TRANSITIONS: &[Transition] = &[
    row(S::CourseSelection, E::SelectCourse, S::QuotaSelection, Effect::StoreCourse),
    row(S::QuotaSelection, E::SelectQuota, S::GenderSelection, Effect::StoreQuota),
    row(S::GenderSelection, E::SelectGender, S::MarksInput, Effect::StoreGender),
    row(S::MarksInput, E::SubmitMarks, S::MarksInput, Effect::BeginPrediction),
    row(S::MarksInput, E::PredictionSucceeded, S::Result, Effect::StoreResult),
    row(S::MarksInput, E::PredictionFailed, S::Error, Effect::StoreFailure),
    row(S::QuotaSelection, E::Back(S::CourseSelection), S::CourseSelection, Effect::Rewind),
    row(S::GenderSelection, E::Back(S::QuotaSelection), S::QuotaSelection, Effect::Rewind),
    row(S::GenderSelection, E::Back(S::CourseSelection), S::CourseSelection, Effect::Rewind),
    row(S::MarksInput, E::Back(S::GenderSelection), S::GenderSelection, Effect::Rewind),
    row(S::MarksInput, E::Back(S::QuotaSelection), S::QuotaSelection, Effect::Rewind),
    row(S::MarksInput, E::Back(S::CourseSelection), S::CourseSelection, Effect::Rewind),
    Transition {
        from: None,
        event: E::Reset,
        to: S::CourseSelection,
        effect: Effect::ClearAll,
    },
];

/// Find the table row for `event` in `from`, if the pair is legal.
pub fn lookup(from: WizardStep, event: EventKind) -> Option<&'static Transition> {
    TRANSITIONS
        .iter()
        .find(|t| t.event == event && t.from.is_none_or(|step| step == from))
}

/// Earlier steps reachable from `from` with a back event, nearest first.
pub fn back_targets(from: WizardStep) -> Vec<WizardStep> {
    let mut targets: Vec<WizardStep> = TRANSITIONS
        .iter()
        .filter(|t| t.from == Some(from))
        .filter_map(|t| match t.event {
            EventKind::Back(target) => Some(target),
            _ => None,
        })
        .collect();
    targets.sort_by(|a, b| b.cmp(a));
    targets
}

/// Identifies one prediction request; completions must quote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A prediction request issued by `submit_marks`, waiting to be performed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPrediction {
    pub ticket: RequestTicket,
    pub request: PredictionRequest,
}

/// An event raised by a step view (or by a completed request).
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    SelectCourse(String),
    SelectQuota(String),
    SelectGender(String),
    SubmitMarks(SubjectMarks),
    Back(WizardStep),
    PredictionSucceeded {
        ticket: RequestTicket,
        result: PredictionResult,
    },
    PredictionFailed {
        ticket: RequestTicket,
        message: String,
    },
    Reset,
}

impl WizardEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::SelectCourse(_) => EventKind::SelectCourse,
            Self::SelectQuota(_) => EventKind::SelectQuota,
            Self::SelectGender(_) => EventKind::SelectGender,
            Self::SubmitMarks(_) => EventKind::SubmitMarks,
            Self::Back(target) => EventKind::Back(*target),
            Self::PredictionSucceeded { .. } => EventKind::PredictionSucceeded,
            Self::PredictionFailed { .. } => EventKind::PredictionFailed,
            Self::Reset => EventKind::Reset,
        }
    }
}

/// What a successfully applied event led to.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The wizard is now at this step
    Moved(WizardStep),
    /// A prediction request must be performed and reported back
    PredictionRequested(PendingPrediction),
}

/// Errors that can occur during wizard transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// The event is not legal in the current step
    #[error("Cannot {event} while at step '{from}'")]
    InvalidTransition { from: WizardStep, event: EventKind },

    /// Tried to submit marks with a gap in the earlier selections
    #[error("No course, quota, or gender selected. Please go back.")]
    MissingSelection { missing: Vec<SelectionField> },

    /// A prediction request is outstanding; only reset is accepted
    #[error("A prediction request is already in progress")]
    RequestInFlight,

    /// A selection event carried an empty value
    #[error("The {field} selection cannot be empty")]
    EmptySelection { field: SelectionField },

    /// A completion arrived for a request that is no longer outstanding
    #[error("No outstanding prediction request matches {ticket}")]
    UnknownRequest { ticket: RequestTicket },
}

/// What the renderer should show, after applying the precedence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// A request is in flight
    Loading,
    /// An error message is set; the only action is reset
    ErrorPanel,
    /// The view for this step, with all prerequisites present
    Step(WizardStep),
    /// The step's prerequisites are unexpectedly absent
    Inconsistent(WizardStep),
}

/// Owner of the wizard step, selections and prediction outcome.
///
/// # Example
///
/// ```
/// use admitui::wizard_state::{WizardController, WizardStep};
///
/// let mut wizard = WizardController::new();
/// wizard.select_course("B.Tech CSE").unwrap();
/// assert_eq!(wizard.step(), WizardStep::QuotaSelection);
///
/// // Cannot pick a gender before a quota
/// assert!(wizard.select_gender("male").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WizardController {
    step: WizardStep,
    selection: Selection,
    error_message: Option<String>,
    prediction: Option<PredictionResult>,
    in_flight: Option<RequestTicket>,
    next_ticket: u64,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardController {
    /// Create a wizard at the course selection step with nothing selected.
    pub fn new() -> Self {
        Self {
            step: WizardStep::CourseSelection,
            selection: Selection::default(),
            error_message: None,
            prediction: None,
            in_flight: None,
            next_ticket: 1,
        }
    }

    /// Build a wizard at an arbitrary step with an arbitrary selection.
    ///
    /// Bypasses the transition table; meant for tests that need states the
    /// views can never produce.
    #[doc(hidden)]
    pub fn from_parts(step: WizardStep, selection: Selection) -> Self {
        Self {
            step,
            selection,
            ..Self::new()
        }
    }

    #[inline]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[inline]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[inline]
    pub fn prediction(&self) -> Option<&PredictionResult> {
        self.prediction.as_ref()
    }

    /// True while a prediction request is outstanding
    #[inline]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Ticket of the outstanding request, if any
    #[inline]
    pub fn in_flight(&self) -> Option<RequestTicket> {
        self.in_flight
    }

    /// Earlier steps reachable from the current one.
    pub fn back_targets(&self) -> Vec<WizardStep> {
        if self.is_loading() {
            return Vec::new();
        }
        back_targets(self.step)
    }

    /// Decide what to render: loading > error > step view.
    pub fn screen(&self) -> Screen {
        if self.in_flight.is_some() {
            return Screen::Loading;
        }
        if self.error_message.as_deref().is_some_and(|m| !m.is_empty()) {
            return Screen::ErrorPanel;
        }
        match self.step {
            WizardStep::Result if self.prediction.is_none() => Screen::Inconsistent(self.step),
            // Error without a message has nothing to show
            WizardStep::Error => Screen::Inconsistent(self.step),
            step if !self.selection.missing_for(step).is_empty() => Screen::Inconsistent(step),
            step => Screen::Step(step),
        }
    }

    pub fn select_course(&mut self, name: impl Into<String>) -> Result<WizardStep, WizardError> {
        self.apply_moved(WizardEvent::SelectCourse(name.into()))
    }

    pub fn select_quota(&mut self, quota: impl Into<String>) -> Result<WizardStep, WizardError> {
        self.apply_moved(WizardEvent::SelectQuota(quota.into()))
    }

    pub fn select_gender(&mut self, gender: impl Into<String>) -> Result<WizardStep, WizardError> {
        self.apply_moved(WizardEvent::SelectGender(gender.into()))
    }

    /// Rewind to an earlier step, clearing the selections captured from it on.
    pub fn back(&mut self, target: WizardStep) -> Result<WizardStep, WizardError> {
        self.apply_moved(WizardEvent::Back(target))
    }

    /// Return to the first step with everything cleared. Always succeeds.
    pub fn reset(&mut self) {
        if let Some(ticket) = self.in_flight {
            tracing::info!(%ticket, "Reset while a prediction request was in flight; its result will be discarded");
        }
        self.step = WizardStep::CourseSelection;
        self.selection = Selection::default();
        self.error_message = None;
        self.prediction = None;
        self.in_flight = None;
        tracing::debug!("Wizard reset");
    }

    /// Submit the marks and issue a prediction request.
    ///
    /// On success the wizard is loading and the returned request must be
    /// performed and reported back through [`complete_prediction`].
    /// With a gap in the earlier selections the error message is set and the
    /// step stays at `MarksInput`.
    ///
    /// [`complete_prediction`]: Self::complete_prediction
    pub fn submit_marks(&mut self, marks: SubjectMarks) -> Result<PendingPrediction, WizardError> {
        match self.dispatch(WizardEvent::SubmitMarks(marks))? {
            Outcome::PredictionRequested(pending) => Ok(pending),
            // The table maps SubmitMarks to BeginPrediction only
            Outcome::Moved(step) => Err(WizardError::InvalidTransition {
                from: step,
                event: EventKind::SubmitMarks,
            }),
        }
    }

    /// Report the outcome of the request identified by `ticket`.
    ///
    /// A ticket that is not the outstanding one (e.g. the wizard was reset in
    /// the meantime) is rejected and the outcome discarded.
    pub fn complete_prediction(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<PredictionResult, PredictionError>,
    ) -> Result<WizardStep, WizardError> {
        let event = match outcome {
            Ok(result) => WizardEvent::PredictionSucceeded { ticket, result },
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "Prediction failed");
                WizardEvent::PredictionFailed {
                    ticket,
                    message: err.to_string(),
                }
            }
        };
        self.apply_moved(event)
    }

    /// Submit the marks and perform the request synchronously with `client`.
    pub fn submit_with(
        &mut self,
        client: &dyn PredictionClient,
        marks: SubjectMarks,
    ) -> Result<WizardStep, WizardError> {
        let pending = self.submit_marks(marks)?;
        let outcome = client.predict(&pending.request);
        self.complete_prediction(pending.ticket, outcome)
    }

    fn apply_moved(&mut self, event: WizardEvent) -> Result<WizardStep, WizardError> {
        match self.dispatch(event)? {
            Outcome::Moved(step) => Ok(step),
            Outcome::PredictionRequested(pending) => {
                tracing::error!(ticket = %pending.ticket, "Unexpected prediction request");
                Err(WizardError::InvalidTransition {
                    from: self.step,
                    event: EventKind::SubmitMarks,
                })
            }
        }
    }

    /// Apply one event through the transition table.
    fn dispatch(&mut self, event: WizardEvent) -> Result<Outcome, WizardError> {
        let kind = event.kind();

        if kind == EventKind::Reset {
            self.reset();
            return Ok(Outcome::Moved(self.step));
        }

        match &event {
            WizardEvent::PredictionSucceeded { ticket, .. }
            | WizardEvent::PredictionFailed { ticket, .. } => {
                if self.in_flight != Some(*ticket) {
                    tracing::warn!(%ticket, "Discarding stale prediction outcome");
                    return Err(WizardError::UnknownRequest { ticket: *ticket });
                }
                self.in_flight = None;
            }
            _ if self.in_flight.is_some() => return Err(WizardError::RequestInFlight),
            _ => {}
        }

        let transition = lookup(self.step, kind).ok_or(WizardError::InvalidTransition {
            from: self.step,
            event: kind,
        })?;

        let outcome = match (transition.effect, event) {
            (Effect::StoreCourse, WizardEvent::SelectCourse(value)) => {
                self.selection.course = Some(non_empty(SelectionField::Course, value)?);
                Outcome::Moved(transition.to)
            }
            (Effect::StoreQuota, WizardEvent::SelectQuota(value)) => {
                self.selection.quota = Some(non_empty(SelectionField::Quota, value)?);
                Outcome::Moved(transition.to)
            }
            (Effect::StoreGender, WizardEvent::SelectGender(value)) => {
                self.selection.gender = Some(non_empty(SelectionField::Gender, value)?);
                Outcome::Moved(transition.to)
            }
            (Effect::BeginPrediction, WizardEvent::SubmitMarks(marks)) => {
                let missing = self.selection.missing_for(WizardStep::MarksInput);
                if !missing.is_empty() {
                    let err = WizardError::MissingSelection { missing };
                    tracing::warn!(error = %err, "Marks submitted with incomplete selection");
                    self.error_message = Some(err.to_string());
                    return Err(err);
                }
                let ticket = RequestTicket(self.next_ticket);
                self.next_ticket += 1;
                self.in_flight = Some(ticket);
                let request = PredictionRequest {
                    course: self.selection.course.clone().unwrap_or_default(),
                    quota: self.selection.quota.clone().unwrap_or_default(),
                    gender: self.selection.gender.clone().unwrap_or_default(),
                    marks,
                };
                tracing::info!(%ticket, course = %request.course, "Prediction requested");
                Outcome::PredictionRequested(PendingPrediction { ticket, request })
            }
            (Effect::Rewind, WizardEvent::Back(target)) => {
                self.selection.clear_from(target);
                Outcome::Moved(transition.to)
            }
            (Effect::StoreResult, WizardEvent::PredictionSucceeded { result, .. }) => {
                self.prediction = Some(result);
                Outcome::Moved(transition.to)
            }
            (Effect::StoreFailure, WizardEvent::PredictionFailed { message, .. }) => {
                self.prediction = None;
                self.step = transition.to;
                self.error_message = Some(failure_message(message));
                tracing::debug!(step = ?self.step, "Wizard transition");
                return Ok(Outcome::Moved(self.step));
            }
            (effect, event) => {
                // Table row and payload disagree; treat as illegal
                tracing::error!(?effect, kind = %event.kind(), "Transition effect does not match event");
                return Err(WizardError::InvalidTransition {
                    from: self.step,
                    event: kind,
                });
            }
        };

        self.step = transition.to;
        self.error_message = None;
        tracing::debug!(step = ?self.step, event = %kind, "Wizard transition");
        Ok(outcome)
    }
}

/// Shown when a failed request carries no usable message
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

fn failure_message(message: String) -> String {
    if message.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

fn non_empty(field: SelectionField, value: String) -> Result<String, WizardError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WizardError::EmptySelection { field });
    }
    Ok(trimmed.to_string())
}
