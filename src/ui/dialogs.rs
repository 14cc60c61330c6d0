//! Dialog rendering module
//!
//! Loading indicator, error panel and the incomplete-selection notice.

use crate::components::centered_rect;
use crate::theme::{Colors, Styles, UiConstants, UiText};
use crate::wizard_state::{SelectionField, WizardStep};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn dialog_area(parent: Rect, height: u16) -> Rect {
    centered_rect(
        parent,
        UiConstants::DIALOG_WIDTH_PCT,
        100,
        (UiConstants::DIALOG_MIN_WIDTH, height),
        (UiConstants::DIALOG_MAX_WIDTH, height),
    )
}

/// Spinner frame for a loop tick
pub fn spinner_frame(tick: usize) -> &'static str {
    UiText::SPINNER[tick % UiText::SPINNER.len()]
}

/// Render the "analyzing" panel shown while a request is in flight
pub fn render_loading(f: &mut Frame, area: Rect, spinner_tick: usize) {
    let dialog = dialog_area(area, 7);
    f.render_widget(Clear, dialog);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} ", spinner_frame(spinner_tick)), Styles::title()),
            Span::styled(UiText::ANALYZING, Styles::text_bold()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Comparing your marks with previous cutoffs",
            Styles::text_muted(),
        )),
    ];

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Styles::border_active())
                .style(Styles::panel_bg()),
        );
    f.render_widget(panel, dialog);
}

/// Render the error panel with its single start-over action
pub fn render_error_panel(f: &mut Frame, area: Rect, message: &str) {
    let dialog = dialog_area(area, 11);
    f.render_widget(Clear, dialog);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Styles::error())
        .title(Span::styled(format!(" {} ", UiText::ERROR_TITLE), Styles::error()))
        .style(Styles::panel_bg_danger());
    let inner = block.inner(dialog);
    f.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(inner);

    let text = Paragraph::new(message.to_string())
        .style(Style::default().fg(Colors::FG_PRIMARY))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(text, chunks[0]);

    let button = Paragraph::new(Line::from(Span::styled(
        UiText::START_OVER,
        Styles::button_active(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(button, chunks[1]);
}

/// Text of the notice shown when a step's prerequisites are missing
pub fn inconsistent_message(step: WizardStep, missing: &[SelectionField]) -> String {
    if missing.is_empty() {
        return format!("The {} screen has nothing to show.", step.title());
    }
    let names: Vec<&str> = missing.iter().map(|field| field.name()).collect();
    format!(
        "The {} screen needs a {} selection that is missing.",
        step.title(),
        names.join(" and ")
    )
}

/// Render the incomplete-selection notice
pub fn render_inconsistent(f: &mut Frame, area: Rect, step: WizardStep, missing: &[SelectionField]) {
    let dialog = dialog_area(area, 9);
    f.render_widget(Clear, dialog);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(inconsistent_message(step, missing), Styles::warning())),
        Line::from(""),
        Line::from(Span::styled(UiText::START_OVER, Styles::button_active())),
    ];
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Styles::warning())
                .title(" Incomplete Selection ")
                .style(Styles::panel_bg()),
        );
    f.render_widget(panel, dialog);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner_frame(0), spinner_frame(UiText::SPINNER.len()));
        assert_ne!(spinner_frame(0), spinner_frame(1));
    }

    #[test]
    fn test_inconsistent_message_names_fields() {
        let msg = inconsistent_message(
            WizardStep::MarksInput,
            &[SelectionField::Quota, SelectionField::Gender],
        );
        assert!(msg.contains("quota and gender"));
        assert!(msg.contains("Enter Your Marks"));
    }
}
