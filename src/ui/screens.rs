//! Wizard step screens
//!
//! The three selection menus share one list-plus-details layout; the marks
//! step renders the entry form.

use super::header::render_instructions;
use crate::catalog::{self, MAX_SUBJECT_SCORE};
use crate::input::{ListCursor, MarksForm};
use crate::marks::format_score;
use crate::theme::{Colors, Styles};
use crate::types::{Gender, Quota};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::str::FromStr;

/// One entry of a selection menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub details: Vec<String>,
}

/// Entries for the course menu, in catalog order
pub fn course_entries() -> Vec<MenuEntry> {
    catalog::courses()
        .iter()
        .map(|course| MenuEntry {
            label: course.name.to_string(),
            details: vec![
                format!("Faculty: {}", course.faculty),
                String::new(),
                "Marks collected for:".to_string(),
            ]
            .into_iter()
            .chain(course.subjects.iter().map(|s| format!("  • {}", s)))
            .collect(),
        })
        .collect()
}

/// Entries for the quota menu, in catalog order
pub fn quota_entries() -> Vec<MenuEntry> {
    catalog::quotas()
        .into_iter()
        .map(|code| {
            let label = Quota::from_str(&code)
                .map(|q| q.label().to_string())
                .unwrap_or_default();
            MenuEntry {
                label: code.to_uppercase(),
                details: vec![label],
            }
        })
        .collect()
}

/// Entries for the gender menu, in catalog order
pub fn gender_entries() -> Vec<MenuEntry> {
    catalog::genders()
        .into_iter()
        .map(|code| {
            let label = Gender::from_str(&code)
                .map(|g| g.label().to_string())
                .unwrap_or(code);
            MenuEntry {
                label,
                details: vec!["Sent to the predictor along with your quota and marks.".to_string()],
            }
        })
        .collect()
}

/// Render a selection menu with a details panel for the highlighted entry
pub fn render_selection_menu(
    f: &mut Frame,
    area: Rect,
    title: &str,
    entries: &[MenuEntry],
    cursor: &ListCursor,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| ListItem::new(format!(" {}", entry.label)).style(Styles::text()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Styles::border_active())
                .title(format!(" {} ", title)),
        )
        .highlight_style(Styles::selected())
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    if !entries.is_empty() {
        list_state.select(Some(cursor.selected().min(entries.len() - 1)));
    }
    f.render_stateful_widget(list, content[0], &mut list_state);

    let details: Vec<Line> = entries
        .get(cursor.selected())
        .map(|entry| {
            std::iter::once(Line::from(Span::styled(entry.label.clone(), Styles::category())))
                .chain(std::iter::once(Line::from("")))
                .chain(entry.details.iter().map(|d| Line::from(d.clone())))
                .collect()
        })
        .unwrap_or_default();

    let details = Paragraph::new(details)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Styles::border_inactive())
                .title(" Details "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(details, content[1]);

    render_instructions(f, chunks[1], "Use ↑/↓ to choose and Enter to confirm");
}

/// Render the marks entry form
pub fn render_marks_form(f: &mut Frame, area: Rect, form: &MarksForm) {
    let field_rows = form.fields().len().max(1) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(field_rows + 2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    let label_width = form
        .fields()
        .iter()
        .map(|f| f.subject.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = Vec::new();
    if form.fields().is_empty() {
        lines.push(Line::from(Span::styled(
            "This course has no subjects to enter.",
            Styles::warning(),
        )));
    }
    for (i, field) in form.fields().iter().enumerate() {
        let focused = i == form.focus();
        let marker = if focused { "▸ " } else { "  " };
        let value_style = if focused {
            Style::default()
                .fg(Colors::SELECTED_FG)
                .bg(Colors::PRIMARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Styles::text()
        };
        let shown = if focused {
            format!(" {:<6}▏", field.value)
        } else {
            format!(" {:<6} ", field.value)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Styles::focused()),
            Span::styled(
                format!("{:<width$} ", field.subject, width = label_width),
                if focused { Styles::focused() } else { Styles::text_secondary() },
            ),
            Span::styled(shown, value_style),
            Span::styled(
                format!("  / {}", format_score(MAX_SUBJECT_SCORE)),
                Styles::text_muted(),
            ),
        ]));
    }

    let form_widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Styles::border_active())
            .title(format!(" Marks for {} ", form.course())),
    );
    f.render_widget(form_widget, chunks[0]);

    let footer = match form.error() {
        Some(err) => Line::from(Span::styled(format!("✗ {}", err), Styles::error())),
        None => Line::from(Span::styled(
            "Enter moves to the next subject; Enter on the last one (or Ctrl+S) predicts",
            Styles::text_secondary(),
        )),
    };
    f.render_widget(Paragraph::new(footer).wrap(Wrap { trim: true }), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_counts_match_catalogs() {
        assert_eq!(course_entries().len(), catalog::courses().len());
        assert_eq!(quota_entries().len(), 7);
        assert_eq!(gender_entries().len(), 3);
    }

    #[test]
    fn test_course_details_list_subjects() {
        let entries = course_entries();
        let first = &entries[0];
        assert_eq!(first.label, "B.Tech CSE");
        assert!(first.details.iter().any(|d| d.contains("Physics")));
    }

    #[test]
    fn test_quota_entries_use_labels() {
        let entries = quota_entries();
        assert_eq!(entries[0].label, "GENERAL");
        assert_eq!(entries[6].details, vec!["Ward of BHU employee".to_string()]);
    }
}
