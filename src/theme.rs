//! Centralized theme and styling for the TUI
//!
//! Single source of truth for colors, styles and layout constants.
//!
//! # Usage
//! ```rust
//! use admitui::theme::{Colors, Styles, Theme};
//! use admitui::types::AdmissionChance;
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! let chance_style = Theme::chance_style(AdmissionChance::High);
//! ```

use ratatui::style::{Color, Modifier, Style};

use crate::types::{AdmissionChance, CampusStatus};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    // -------------------------------------------------------------------------
    // Base Colors
    // -------------------------------------------------------------------------

    /// Primary dark background for panels and dialogs
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Error panel background
    pub const BG_DANGER: Color = Color::Rgb(30, 20, 20);

    /// Gauge background
    pub const BG_GAUGE: Color = Color::Rgb(40, 40, 50);

    pub const FG_PRIMARY: Color = Color::White;
    pub const FG_SECONDARY: Color = Color::Gray;
    pub const FG_MUTED: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Accent Colors
    // -------------------------------------------------------------------------

    /// Borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Selected items, emphasis
    pub const SECONDARY: Color = Color::Yellow;

    // -------------------------------------------------------------------------
    // Semantic Colors
    // -------------------------------------------------------------------------

    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
    pub const INFO: Color = Color::Blue;

    // -------------------------------------------------------------------------
    // UI Element Colors
    // -------------------------------------------------------------------------

    pub const BORDER_ACTIVE: Color = Color::Cyan;
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Selected item highlight
    pub const SELECTED_BG: Color = Color::Yellow;

    /// Selected item text (for contrast on yellow bg)
    pub const SELECTED_FG: Color = Color::Black;

    pub const UNSELECTED: Color = Color::Gray;
    pub const NAV_HINT: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Step Indicator Colors
    // -------------------------------------------------------------------------

    pub const STEP_ACTIVE: Color = Color::Yellow;
    pub const STEP_COMPLETE: Color = Color::Green;
    pub const STEP_PENDING: Color = Color::Gray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    pub fn text_bold() -> Style {
        Style::default()
            .fg(Colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Main title style (cyan, bold)
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Section header (yellow, bold)
    pub fn category() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    pub fn panel_bg() -> Style {
        Style::default().bg(Colors::BG_PRIMARY)
    }

    pub fn panel_bg_danger() -> Style {
        Style::default().bg(Colors::BG_DANGER)
    }

    /// Selected/highlighted item
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn unselected() -> Style {
        Style::default().fg(Colors::UNSELECTED)
    }

    /// Focused input field
    pub fn focused() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Colors::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }

    /// Active/selected button
    pub fn button_active() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn progress() -> Style {
        Style::default().fg(Colors::SUCCESS).bg(Colors::BG_GAUGE)
    }

    /// Navigation hint (keybindings)
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }
}

// =============================================================================
// THEME CONTEXT
// =============================================================================

/// Semantic style lookups
pub struct Theme;

impl Theme {
    /// Color for an admission chance level
    pub fn chance_color(chance: AdmissionChance) -> Color {
        match chance {
            AdmissionChance::High => Colors::SUCCESS,
            AdmissionChance::Medium => Colors::WARNING,
            AdmissionChance::Low => Colors::ERROR,
        }
    }

    pub fn chance_style(chance: AdmissionChance) -> Style {
        Style::default()
            .fg(Self::chance_color(chance))
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_style(status: CampusStatus) -> Style {
        match status {
            CampusStatus::Likely => Styles::success(),
            CampusStatus::Borderline => Styles::warning(),
            CampusStatus::Unlikely => Styles::error(),
        }
    }

    /// Style for a step in the step indicator
    pub fn step_style(completed: bool, active: bool) -> Style {
        if active {
            Style::default()
                .fg(Colors::STEP_ACTIVE)
                .add_modifier(Modifier::BOLD)
        } else if completed {
            Style::default().fg(Colors::STEP_COMPLETE)
        } else {
            Style::default().fg(Colors::STEP_PENDING)
        }
    }

    /// Gauge color for an admission probability in percent
    pub fn probability_color(percent: f64) -> Color {
        if percent >= 70.0 {
            Colors::SUCCESS
        } else if percent >= 40.0 {
            Colors::WARNING
        } else {
            Colors::ERROR
        }
    }
}

// =============================================================================
// UI CONSTANTS
// =============================================================================

/// Layout constants
pub struct UiConstants;

impl UiConstants {
    pub const DIALOG_WIDTH_PCT: u16 = 60;
    pub const DIALOG_MIN_WIDTH: u16 = 40;
    pub const DIALOG_MAX_WIDTH: u16 = 80;

    /// Title line plus step indicator plus border
    pub const HEADER_HEIGHT: u16 = 4;
    pub const NAV_BAR_HEIGHT: u16 = 1;

    /// Lines moved by PgUp/PgDn
    pub const PAGE_SCROLL_SIZE: usize = 10;
}

/// Common UI strings
pub struct UiText;

impl UiText {
    pub const APP_TITLE: &'static str = "BHU Admission Predictor";
    pub const ANALYZING: &'static str = "Analyzing your profile...";
    pub const START_OVER: &'static str = "[ Start Over ]";
    pub const ERROR_TITLE: &'static str = "An Error Occurred";
    pub const SPINNER: &'static [&'static str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
}
