//! User interface rendering module
//!
//! - `header` - Title, step indicator, navigation bar and help overlay
//! - `screens` - Selection menus and the marks form
//! - `results` - Prediction report
//! - `dialogs` - Loading, error and incomplete-selection panels

mod dialogs;
mod header;
pub mod results;
pub mod screens;

use crate::app::{AppMode, AppState};
use crate::components::keybindings::KeybindingContext;
use crate::theme::{Styles, UiConstants};
use crate::wizard_state::{Screen, WizardController, WizardStep};
use header::HeaderRenderer;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Top-level renderer: header, body for the current screen, nav bar.
#[derive(Debug, Default)]
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Draw one frame.
    pub fn render(
        &self,
        f: &mut Frame,
        wizard: &WizardController,
        state: &AppState,
        keybinding_ctx: &KeybindingContext,
    ) {
        let screen = wizard.screen();
        let mode = AppMode::from_screen(screen);
        let status_height = u16::from(state.status_message.is_some());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(UiConstants::HEADER_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(status_height),
                Constraint::Length(UiConstants::NAV_BAR_HEIGHT),
            ])
            .split(f.area());

        self.header.render_header(f, chunks[0], wizard);
        self.render_body(f, chunks[1], screen, wizard, state);

        if let Some(message) = &state.status_message {
            render_status_line(f, chunks[2], message);
        }
        header::render_nav_bar(f, mode, keybinding_ctx, chunks[3]);

        if state.help_visible {
            header::render_help_overlay(f, mode, keybinding_ctx);
        }
    }

    fn render_body(
        &self,
        f: &mut Frame,
        area: Rect,
        screen: Screen,
        wizard: &WizardController,
        state: &AppState,
    ) {
        match screen {
            Screen::Loading => dialogs::render_loading(f, area, state.spinner_tick),
            Screen::ErrorPanel => {
                let message = wizard.error_message().unwrap_or_default();
                dialogs::render_error_panel(f, area, message);
            }
            Screen::Inconsistent(step) => {
                let missing = wizard.selection().missing_for(step);
                dialogs::render_inconsistent(f, area, step, &missing);
            }
            Screen::Step(step) => match step {
                WizardStep::CourseSelection => screens::render_selection_menu(
                    f,
                    area,
                    step.title(),
                    &screens::course_entries(),
                    &state.course_menu,
                ),
                WizardStep::QuotaSelection => screens::render_selection_menu(
                    f,
                    area,
                    step.title(),
                    &screens::quota_entries(),
                    &state.quota_menu,
                ),
                WizardStep::GenderSelection => screens::render_selection_menu(
                    f,
                    area,
                    step.title(),
                    &screens::gender_entries(),
                    &state.gender_menu,
                ),
                WizardStep::MarksInput => match &state.marks_form {
                    Some(form) => screens::render_marks_form(f, area, form),
                    None => dialogs::render_inconsistent(f, area, step, &[]),
                },
                WizardStep::Result => match wizard.prediction() {
                    Some(result) => results::render_result(f, area, result, state.result_scroll),
                    None => dialogs::render_inconsistent(f, area, step, &[]),
                },
                WizardStep::Error => {
                    let message = wizard.error_message().unwrap_or_default();
                    dialogs::render_error_panel(f, area, message);
                }
            },
        }
    }
}

fn render_status_line(f: &mut Frame, area: Rect, message: &str) {
    let line = Line::from(Span::styled(message.to_string(), Styles::warning()));
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
