//! Help overlay component
//!
//! Displays context-sensitive help in a floating window.

use super::centered_rect;
use super::keybindings::{HelpSection, KeybindingContext};
use crate::app::AppMode;
use crate::theme::{Colors, Styles, UiText};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const CLOSE_HINT: &str = "Press ? or Esc to close";

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given mode
    pub fn new(mode: &AppMode, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(mode);
        Self {
            content: Self::build_content(&sections, mode),
        }
    }

    fn build_content(sections: &[HelpSection], mode: &AppMode) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            format!("  {} Help  ", UiText::APP_TITLE),
            Styles::title(),
        )]));
        lines.push(Line::from(""));

        lines.push(Line::from(vec![
            Span::styled("Current: ", Styles::text_muted()),
            Span::styled(mode.name(), Style::default().fg(Colors::SECONDARY)),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )]));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("{:<10}", key),
                        Style::default()
                            .fg(Colors::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description.clone(), Styles::text()),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines
    }

    /// Lines shown in the overlay body
    pub fn lines(&self) -> &[Line<'static>] {
        &self.content
    }

    /// Render the help overlay centered over `parent`
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let area = centered_rect(parent, 60, 70, (50, 15), (80, 35));
        f.render_widget(Clear, area);

        let block = Block::default()
            .title(" Help ")
            .title_bottom(Line::from(CLOSE_HINT).alignment(Alignment::Center))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Styles::border_active())
            .style(Styles::panel_bg());

        let paragraph = Paragraph::new(self.content.clone())
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }
}
