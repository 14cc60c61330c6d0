//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current screen.
//! The same registry drives key dispatch, the navigation bar and the help overlay.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    PageUp,
    PageDown,
    Home,
    End,
    Select,
    Back,
    JumpToCourse,
    JumpToQuota,
    JumpToGender,
    NextField,
    PrevField,
    Submit,
    ScrollUp,
    ScrollDown,
    StartOver,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// True if `event` triggers this binding. Shift is ignored so that
    /// characters like `?` match regardless of how the terminal reports them.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let relevant = event.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT);
        self.key == event.code && relevant == self.modifiers
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        let menu = || {
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Navigate up"),
                Keybinding::new(KeyCode::Char('k'), KeyAction::NavigateUp, "K", "Navigate up"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Navigate down"),
                Keybinding::new(KeyCode::Char('j'), KeyAction::NavigateDown, "J", "Navigate down"),
                Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up"),
                Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down"),
                Keybinding::new(KeyCode::Home, KeyAction::Home, "Home", "Go to first"),
                Keybinding::new(KeyCode::End, KeyAction::End, "End", "Go to last"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Select"),
            ]
        };
        let back = |display: &str, description: &str| {
            vec![
                Keybinding::new(KeyCode::Char('b'), KeyAction::Back, display, description),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", description),
            ]
        };
        let jump_course =
            Keybinding::new(KeyCode::F(2), KeyAction::JumpToCourse, "F2", "Change course");
        let jump_quota =
            Keybinding::new(KeyCode::F(3), KeyAction::JumpToQuota, "F3", "Change quota");
        let jump_gender =
            Keybinding::new(KeyCode::F(4), KeyAction::JumpToGender, "F4", "Change gender");

        self.mode_bindings.insert(AppMode::CourseSelection, menu());

        let mut quota = menu();
        quota.extend(back("B", "Back to course"));
        quota.push(jump_course.clone());
        self.mode_bindings.insert(AppMode::QuotaSelection, quota);

        let mut gender = menu();
        gender.extend(back("B", "Back to quota"));
        gender.push(jump_course.clone());
        gender.push(jump_quota.clone());
        self.mode_bindings.insert(AppMode::GenderSelection, gender);

        self.mode_bindings.insert(
            AppMode::MarksInput,
            vec![
                Keybinding::new(KeyCode::Tab, KeyAction::NextField, "Tab", "Next field"),
                Keybinding::new(KeyCode::Down, KeyAction::NextField, "Down", "Next field"),
                Keybinding::new(KeyCode::BackTab, KeyAction::PrevField, "S-Tab", "Previous field"),
                Keybinding::new(KeyCode::Up, KeyAction::PrevField, "Up", "Previous field"),
                Keybinding::new(KeyCode::Enter, KeyAction::Submit, "Enter", "Next / Predict"),
                Keybinding::with_modifiers(
                    KeyCode::Char('s'),
                    KeyModifiers::CONTROL,
                    KeyAction::Submit,
                    "Ctrl+S",
                    "Predict",
                ),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back to gender"),
                jump_course,
                jump_quota,
                jump_gender,
            ],
        );

        self.mode_bindings.insert(AppMode::Loading, Vec::new());

        let start_over = || {
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::StartOver, "Enter", "Start over"),
                Keybinding::new(KeyCode::Char('r'), KeyAction::StartOver, "R", "Start over"),
            ]
        };
        self.mode_bindings.insert(AppMode::ErrorPanel, start_over());
        self.mode_bindings.insert(AppMode::Inconsistent, start_over());

        let mut result = vec![
            Keybinding::new(KeyCode::Up, KeyAction::ScrollUp, "Up", "Scroll up"),
            Keybinding::new(KeyCode::Char('k'), KeyAction::ScrollUp, "K", "Scroll up"),
            Keybinding::new(KeyCode::Down, KeyAction::ScrollDown, "Down", "Scroll down"),
            Keybinding::new(KeyCode::Char('j'), KeyAction::ScrollDown, "J", "Scroll down"),
            Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up"),
            Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down"),
            Keybinding::new(KeyCode::Home, KeyAction::Home, "Home", "Scroll to top"),
        ];
        result.extend(start_over());
        self.mode_bindings.insert(AppMode::Result, result);
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }

        // Plain `q` would be swallowed by text entry, so it is not offered there
        bindings.extend(
            self.global_bindings
                .iter()
                .filter(|b| !(mode.is_text_entry() && b.key == KeyCode::Char('q'))),
        );

        bindings
    }

    /// Resolve a key press to the action bound to it in `mode`.
    pub fn resolve(&self, mode: &AppMode, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(mode)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        let priority_actions: &[KeyAction] = match mode {
            AppMode::CourseSelection => &[
                KeyAction::NavigateUp,
                KeyAction::Select,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::QuotaSelection | AppMode::GenderSelection => &[
                KeyAction::NavigateUp,
                KeyAction::Select,
                KeyAction::Back,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::MarksInput => &[
                KeyAction::NextField,
                KeyAction::Submit,
                KeyAction::Back,
                KeyAction::Help,
            ],
            AppMode::Loading => &[KeyAction::Quit],
            AppMode::ErrorPanel | AppMode::Inconsistent => {
                &[KeyAction::StartOver, KeyAction::Help, KeyAction::Quit]
            }
            AppMode::Result => &[
                KeyAction::ScrollUp,
                KeyAction::StartOver,
                KeyAction::Help,
                KeyAction::Quit,
            ],
        };

        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            let Some(binding) = bindings.iter().find(|b| b.action == *action) else {
                continue;
            };
            let item = match action {
                KeyAction::NavigateUp => NavBarItem::new("Up/Dn", "Navigate"),
                KeyAction::ScrollUp => NavBarItem::new("Up/Dn", "Scroll"),
                KeyAction::NextField => NavBarItem::new("Tab", "Next field"),
                _ => NavBarItem::new(&binding.display, &binding.description),
            };
            items.push(item);
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let groups: [(&str, fn(KeyAction) -> bool); 3] = [
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::PageUp
                        | KeyAction::PageDown
                        | KeyAction::Home
                        | KeyAction::End
                        | KeyAction::ScrollUp
                        | KeyAction::ScrollDown
                        | KeyAction::NextField
                        | KeyAction::PrevField
                )
            }),
            ("Actions", |a| {
                matches!(
                    a,
                    KeyAction::Select
                        | KeyAction::Submit
                        | KeyAction::StartOver
                        | KeyAction::Back
                        | KeyAction::JumpToCourse
                        | KeyAction::JumpToQuota
                        | KeyAction::JumpToGender
                )
            }),
            ("General", |a| matches!(a, KeyAction::Help | KeyAction::Quit)),
        ];

        let bindings = self.get_bindings(mode);
        groups
            .iter()
            .filter_map(|(title, belongs)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| belongs(b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

impl NavBarItem {
    fn new(key_display: &str, action_label: &str) -> Self {
        Self {
            key_display: key_display.to_string(),
            action_label: action_label.to_string(),
        }
    }
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_resolve_menu_keys() {
        let ctx = KeybindingContext::new();
        let mode = AppMode::QuotaSelection;
        assert_eq!(ctx.resolve(&mode, &key(KeyCode::Enter)), Some(KeyAction::Select));
        assert_eq!(ctx.resolve(&mode, &key(KeyCode::Char('j'))), Some(KeyAction::NavigateDown));
        assert_eq!(ctx.resolve(&mode, &key(KeyCode::Esc)), Some(KeyAction::Back));
        assert_eq!(ctx.resolve(&mode, &key(KeyCode::F(2))), Some(KeyAction::JumpToCourse));
        // Cannot jump forward
        assert_eq!(ctx.resolve(&mode, &key(KeyCode::F(4))), None);
    }

    #[test]
    fn test_course_selection_has_no_back() {
        let ctx = KeybindingContext::new();
        assert_eq!(
            ctx.resolve(&AppMode::CourseSelection, &key(KeyCode::Esc)),
            None
        );
    }

    #[test]
    fn test_q_is_not_quit_in_text_entry() {
        let ctx = KeybindingContext::new();
        assert_eq!(
            ctx.resolve(&AppMode::MarksInput, &key(KeyCode::Char('q'))),
            None
        );
        assert_eq!(
            ctx.resolve(&AppMode::CourseSelection, &key(KeyCode::Char('q'))),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let ctx = KeybindingContext::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [
            AppMode::CourseSelection,
            AppMode::MarksInput,
            AppMode::Loading,
            AppMode::Result,
        ] {
            assert_eq!(ctx.resolve(&mode, &ctrl_c), Some(KeyAction::Quit), "{:?}", mode);
        }
    }

    #[test]
    fn test_ctrl_s_submits_but_plain_s_does_not() {
        let ctx = KeybindingContext::new();
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(
            ctx.resolve(&AppMode::MarksInput, &ctrl_s),
            Some(KeyAction::Submit)
        );
        assert_eq!(ctx.resolve(&AppMode::MarksInput, &key(KeyCode::Char('s'))), None);
    }

    #[test]
    fn test_shifted_question_mark_opens_help() {
        let ctx = KeybindingContext::new();
        let shifted = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(
            ctx.resolve(&AppMode::Result, &shifted),
            Some(KeyAction::Help)
        );
    }

    #[test]
    fn test_loading_only_quits() {
        let ctx = KeybindingContext::new();
        assert_eq!(ctx.resolve(&AppMode::Loading, &key(KeyCode::Enter)), None);
        let items = ctx.get_nav_items(&AppMode::Loading);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].action_label, "Quit");
    }

    #[test]
    fn test_nav_items_combine_navigation() {
        let ctx = KeybindingContext::new();
        let items = ctx.get_nav_items(&AppMode::GenderSelection);
        assert_eq!(items[0], NavBarItem::new("Up/Dn", "Navigate"));
        assert!(items.iter().any(|i| i.action_label == "Back to quota"));
    }

    #[test]
    fn test_help_content_sections() {
        let ctx = KeybindingContext::new();
        let sections = ctx.get_help_content(&AppMode::MarksInput);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Navigation", "Actions", "General"]);
        let actions = &sections[1];
        assert!(actions.items.iter().any(|(k, _)| k == "F2"));
    }
}
