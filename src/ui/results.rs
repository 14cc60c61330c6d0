//! Prediction result screen

use crate::marks::format_score;
use crate::prediction::PredictionResult;
use crate::theme::{Styles, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};

/// Campus rows shown before the table is truncated
pub const MAX_VISIBLE_CAMPUSES: usize = 8;

/// Table height for `rows` campuses: borders and header plus at most
/// `MAX_VISIBLE_CAMPUSES` rows
pub fn campus_table_height(rows: usize) -> u16 {
    (rows.min(MAX_VISIBLE_CAMPUSES) as u16).max(1) + 3
}

/// Render the full result screen. `scroll` offsets the analysis panel.
pub fn render_result(f: &mut Frame, area: Rect, result: &PredictionResult, scroll: usize) {
    let table_height = campus_table_height(result.campus_predictions.len());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(table_height),
            Constraint::Min(4),
        ])
        .split(area);

    render_summary(f, chunks[0], result);
    render_campus_table(f, chunks[1], result);

    let lines = analysis_lines(result);
    let max_scroll = lines.len().saturating_sub(1);
    let offset = scroll.min(max_scroll).min(u16::MAX as usize) as u16;
    let analysis = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Styles::border_inactive())
                .title(" Detailed Analysis "),
        )
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    f.render_widget(analysis, chunks[2]);
}

fn render_summary(f: &mut Frame, area: Rect, result: &PredictionResult) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let mut summary = vec![
        Span::styled("Total score: ", Styles::text_muted()),
        Span::styled(format_score(result.total_score), Styles::title()),
    ];
    if !result.course_selected.is_empty() {
        summary.push(Span::styled("  │  ", Styles::text_muted()));
        summary.push(Span::styled(result.course_selected.clone(), Styles::text_bold()));
    }
    let summary = Paragraph::new(Line::from(summary)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Styles::border_active()),
    );
    f.render_widget(summary, halves[0]);

    let probability = result.detailed_analysis.predicted_admission_probability;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Admission Probability "),
        )
        .gauge_style(Styles::progress().fg(Theme::probability_color(probability)))
        .ratio((probability / 100.0).clamp(0.0, 1.0))
        .label(format!("{}%", format_score(probability)));
    f.render_widget(gauge, halves[1]);
}

fn render_campus_table(f: &mut Frame, area: Rect, result: &PredictionResult) {
    let header = Row::new(["", "Campus", "Prev. Cutoff", "Round", "Chance"])
        .style(Styles::category());

    let rows: Vec<Row> = result
        .campus_predictions
        .iter()
        .take(MAX_VISIBLE_CAMPUSES)
        .map(|campus| {
            Row::new(vec![
                Cell::from(campus.status.to_string()).style(Theme::status_style(campus.status)),
                Cell::from(campus.campus_name.clone()),
                Cell::from(campus.previous_cutoff.clone()),
                Cell::from(campus.possible_round.clone()),
                Cell::from(campus.admission_chance.to_string())
                    .style(Theme::chance_style(campus.admission_chance)),
            ])
        })
        .collect();

    let total = result.campus_predictions.len();
    let title = if total == 0 {
        " Campus Predictions (none returned) ".to_string()
    } else if total > MAX_VISIBLE_CAMPUSES {
        format!(" Campus Predictions ({} of {}) ", MAX_VISIBLE_CAMPUSES, total)
    } else {
        " Campus Predictions ".to_string()
    };
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(20),
            Constraint::Length(13),
            Constraint::Length(12),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Styles::border_active())
            .title(title),
    );
    f.render_widget(table, area);
}

/// Analysis and recommendation lines, in display order
pub fn analysis_lines(result: &PredictionResult) -> Vec<Line<'static>> {
    let analysis = &result.detailed_analysis;
    let mut lines = vec![Line::from(vec![
        Span::styled("Recommended campus: ", Styles::text_muted()),
        Span::styled(analysis.recommended_campus.clone(), Styles::success()),
    ])];

    push_section(&mut lines, "Alternative options", &analysis.alternative_options, "•");
    push_section(&mut lines, "Improvement areas", &analysis.improvement_areas, "•");

    if !result.recommendations.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Recommendations", Styles::category())));
        for (i, rec) in result.recommendations.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}. ", i + 1), Styles::text_muted()),
                Span::styled(rec.clone(), Style::default()),
            ]));
        }
    }
    lines
}

fn push_section(lines: &mut Vec<Line<'static>>, title: &str, items: &[String], bullet: &str) {
    if items.is_empty() {
        return;
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(title.to_string(), Styles::category())));
    for item in items {
        lines.push(Line::from(format!("  {} {}", bullet, item)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::fake::sample_result;
    use ratatui::{backend::TestBackend, Terminal};

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_analysis_lines_include_sections() {
        let lines = analysis_lines(&sample_result("B.Tech CSE", 255.0));
        let text = text(&lines);
        assert!(text.contains("Recommended campus: Main Campus, Varanasi"));
        assert!(text.contains("Improvement areas"));
        assert!(text.contains("  • Chemistry"));
        assert!(text.contains("  1. Fill choices"));
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let mut result = sample_result("B.Tech CSE", 255.0);
        result.detailed_analysis.alternative_options.clear();
        result.recommendations.clear();
        let text = text(&analysis_lines(&result));
        assert!(!text.contains("Alternative options"));
        assert!(!text.contains("Recommendations"));
    }

    #[test]
    fn test_campus_table_height_is_capped() {
        assert_eq!(campus_table_height(0), 4);
        assert_eq!(campus_table_height(2), 5);
        assert_eq!(campus_table_height(30), MAX_VISIBLE_CAMPUSES as u16 + 3);
    }

    #[test]
    fn test_long_campus_list_leaves_room_for_analysis() {
        let mut result = sample_result("B.Tech CSE", 255.0);
        let template = result.campus_predictions[0].clone();
        result.campus_predictions = (0..30)
            .map(|i| {
                let mut campus = template.clone();
                campus.campus_name = format!("Campus {}", i);
                campus
            })
            .collect();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test terminal");
        terminal
            .draw(|f| render_result(f, f.area(), &result, 0))
            .expect("draw");
        let buffer = terminal.backend().buffer().clone();
        let screen: String = buffer.content().iter().map(|cell| cell.symbol()).collect();

        assert!(screen.contains("Campus Predictions (8 of 30)"));
        assert!(screen.contains("Detailed Analysis"));
        assert!(screen.contains("Recommended campus"));
        assert!(!screen.contains("Campus 8 "));
    }
}
