//! Header and common widget rendering
//!
//! Title bar with the step indicator, the selection summary line and the
//! bottom navigation bar.

use crate::app::AppMode;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::{KeybindingContext, NavBarItem};
use crate::theme::{Styles, Theme, UiText};
use crate::wizard_state::{WizardController, WizardStep};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Labels shown in the step indicator, in step order
const STEP_LABELS: [(WizardStep, &str); WizardStep::INPUT_STEPS] = [
    (WizardStep::CourseSelection, "Course"),
    (WizardStep::QuotaSelection, "Quota"),
    (WizardStep::GenderSelection, "Gender"),
    (WizardStep::MarksInput, "Marks"),
];

/// Header renderer
#[derive(Debug, Default)]
pub struct HeaderRenderer;

impl HeaderRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the title block: app name, then the step indicator
    pub fn render_header(&self, f: &mut Frame, area: Rect, wizard: &WizardController) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let subtitle = match wizard.step().step_number() {
            Some(n) => format!(
                " Step {} of {}: {} ",
                n,
                WizardStep::INPUT_STEPS,
                wizard.step().title()
            ),
            None => format!(" {} ", wizard.step().title()),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Styles::border_active())
            .title(Span::styled(format!(" {} ", UiText::APP_TITLE), Styles::title()))
            .title_bottom(Line::from(subtitle).alignment(Alignment::Right));

        let lines = vec![
            step_indicator(wizard.step()),
            selection_summary(wizard),
        ];
        let header = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }
}

/// "1 Course ─ 2 Quota ─ 3 Gender ─ 4 Marks" with per-step styling
pub fn step_indicator(current: WizardStep) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (step, label)) in STEP_LABELS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ─ ", Styles::text_muted()));
        }
        let completed = current.order() > step.order();
        let active = current == *step;
        let marker = if completed { "✓".to_string() } else { (i + 1).to_string() };
        spans.push(Span::styled(
            format!("{} {}", marker, label),
            Theme::step_style(completed, active),
        ));
    }
    Line::from(spans)
}

/// One-line summary of the choices made so far
pub fn selection_summary(wizard: &WizardController) -> Line<'static> {
    let selection = wizard.selection();
    let parts = [
        ("Course", selection.course.as_deref()),
        ("Quota", selection.quota.as_deref()),
        ("Gender", selection.gender.as_deref()),
    ];

    let mut spans = Vec::new();
    for (label, value) in parts {
        let Some(value) = value else { continue };
        if !spans.is_empty() {
            spans.push(Span::styled("  │  ", Styles::text_muted()));
        }
        spans.push(Span::styled(format!("{}: ", label), Styles::text_muted()));
        spans.push(Span::styled(value.to_string(), Styles::text_bold()));
    }
    if spans.is_empty() {
        spans.push(Span::styled("Nothing selected yet", Styles::text_muted()));
    }
    Line::from(spans)
}

/// Render instructions text
pub fn render_instructions(f: &mut Frame, area: Rect, text: &str) {
    let instructions = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Styles::text_secondary());
    f.render_widget(instructions, area);
}

/// Nav bar spans: "[Key] Action" pairs separated by spaces
pub fn nav_bar_line(items: &[NavBarItem]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!("[{}]", item.key_display), Styles::category()));
        spans.push(Span::styled(format!(" {}", item.action_label), Styles::nav_hint()));
    }
    Line::from(spans)
}

/// Render the navigation bar
pub fn render_nav_bar(f: &mut Frame, mode: AppMode, keybinding_ctx: &KeybindingContext, area: Rect) {
    let nav_items = keybinding_ctx.get_nav_items(&mode);
    let nav_bar = Paragraph::new(nav_bar_line(&nav_items)).alignment(Alignment::Center);
    f.render_widget(nav_bar, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, mode: AppMode, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(&mode, keybinding_ctx);
    let area = f.area();
    help_overlay.render(f, area);
}
