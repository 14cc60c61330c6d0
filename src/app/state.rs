//! Application state definitions
//!
//! View-side state that the wizard controller does not own: menu cursors,
//! the marks form, help visibility, scroll position and the spinner frame.

use crate::catalog;
use crate::input::{ListCursor, MarksForm};
use crate::wizard_state::{Screen, WizardStep};

/// What the UI is currently showing, derived from the wizard's screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    CourseSelection,
    QuotaSelection,
    GenderSelection,
    MarksInput,
    /// Prediction request in flight
    Loading,
    /// Error message with a single start-over action
    ErrorPanel,
    Result,
    /// A step whose prerequisite selection is missing
    Inconsistent,
}

impl AppMode {
    pub fn from_screen(screen: Screen) -> Self {
        match screen {
            Screen::Loading => Self::Loading,
            Screen::ErrorPanel => Self::ErrorPanel,
            Screen::Inconsistent(_) => Self::Inconsistent,
            Screen::Step(step) => match step {
                WizardStep::CourseSelection => Self::CourseSelection,
                WizardStep::QuotaSelection => Self::QuotaSelection,
                WizardStep::GenderSelection => Self::GenderSelection,
                WizardStep::MarksInput => Self::MarksInput,
                WizardStep::Result => Self::Result,
                // The error step always renders through the error panel
                WizardStep::Error => Self::ErrorPanel,
            },
        }
    }

    /// Display name used by the help overlay
    pub const fn name(self) -> &'static str {
        match self {
            Self::CourseSelection => "Course Selection",
            Self::QuotaSelection => "Quota Selection",
            Self::GenderSelection => "Gender Selection",
            Self::MarksInput => "Marks Entry",
            Self::Loading => "Analyzing",
            Self::ErrorPanel => "Error",
            Self::Result => "Prediction Result",
            Self::Inconsistent => "Incomplete Selection",
        }
    }

    /// True when typed characters go to a text field
    pub const fn is_text_entry(self) -> bool {
        matches!(self, Self::MarksInput)
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub course_menu: ListCursor,
    pub quota_menu: ListCursor,
    pub gender_menu: ListCursor,
    /// Present while the wizard is at the marks step
    pub marks_form: Option<MarksForm>,
    pub help_visible: bool,
    /// First visible line of the result details
    pub result_scroll: usize,
    /// Advances every loop iteration while loading
    pub spinner_tick: usize,
    /// Last non-fatal problem, shown under the body
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            course_menu: ListCursor::new(catalog::courses().len()),
            quota_menu: ListCursor::new(catalog::quotas().len()),
            gender_menu: ListCursor::new(catalog::genders().len()),
            marks_form: None,
            help_visible: false,
            result_scroll: 0,
            spinner_tick: 0,
            status_message: None,
        }
    }
}

impl AppState {
    /// Forget all view state, as after a reset
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
