//! Input handling module
//!
//! Cursor state for the selection menus and the marks entry form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::{Course, MAX_SUBJECT_SCORE};
use crate::marks::{MarksError, SubjectMarks, parse_score};

/// Longest value accepted in a single marks field
const MAX_FIELD_LEN: usize = 6;

/// Cursor over a fixed-length list of menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListCursor {
    selected: usize,
    len: usize,
}

impl ListCursor {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move up one item, wrapping to the bottom
    pub fn move_up(&mut self) {
        if self.len == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            self.len - 1
        } else {
            self.selected - 1
        };
    }

    /// Move down one item, wrapping to the top
    pub fn move_down(&mut self) {
        if self.len == 0 {
            return;
        }
        self.selected = (self.selected + 1) % self.len;
    }

    pub fn page_up(&mut self, page: usize) {
        self.selected = self.selected.saturating_sub(page);
    }

    pub fn page_down(&mut self, page: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page).min(self.len - 1);
        }
    }

    pub fn home(&mut self) {
        self.selected = 0;
    }

    pub fn end(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }
}

/// One numeric field of the marks form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarksField {
    pub subject: String,
    pub value: String,
}

/// Outcome of feeding a key to the marks form
#[derive(Debug, Clone, PartialEq)]
pub enum InputResult {
    /// All fields validated; raise the submit event with these marks
    Submit(SubjectMarks),
    /// Keep editing
    Continue,
}

/// Marks entry form: one field per subject of the selected course.
#[derive(Debug, Clone, PartialEq)]
pub struct MarksForm {
    course: String,
    fields: Vec<MarksField>,
    focus: usize,
    error: Option<String>,
}

impl MarksForm {
    /// Build an empty form for the subjects of `course`.
    pub fn for_course(course: &Course) -> Self {
        Self::with_subjects(course.name, course.subjects.iter().copied())
    }

    pub fn with_subjects<'a>(course: &str, subjects: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            course: course.to_string(),
            fields: subjects
                .into_iter()
                .map(|subject| MarksField {
                    subject: subject.to_string(),
                    value: String::new(),
                })
                .collect(),
            focus: 0,
            error: None,
        }
    }

    /// Course this form was built for
    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn fields(&self) -> &[MarksField] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Inline validation message from the last submit attempt
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn on_last_field(&self) -> bool {
        self.focus + 1 >= self.fields.len()
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Set a field's raw text directly
    pub fn set_value(&mut self, index: usize, value: &str) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.chars().take(MAX_FIELD_LEN).collect();
        }
    }

    /// Validate every field and collect the marks in subject order.
    pub fn collect(&self) -> Result<SubjectMarks, MarksError> {
        let mut marks = SubjectMarks::new();
        for field in &self.fields {
            let score = parse_score(&field.subject, &field.value)?;
            marks.insert(field.subject.clone(), score)?;
        }
        marks.validate_range(MAX_SUBJECT_SCORE)?;
        Ok(marks)
    }

    /// Validate and return the marks, or record the inline error.
    pub fn submit(&mut self) -> InputResult {
        match self.collect() {
            Ok(marks) => {
                self.error = None;
                InputResult::Submit(marks)
            }
            Err(err) => {
                tracing::debug!(error = %err, "Marks form rejected");
                if let Some(index) = self.field_for_error(&err) {
                    self.focus = index;
                }
                self.error = Some(err.to_string());
                InputResult::Continue
            }
        }
    }

    fn field_for_error(&self, err: &MarksError) -> Option<usize> {
        let subject = match err {
            MarksError::NotANumber { subject, .. } | MarksError::OutOfRange { subject, .. } => {
                subject
            }
            _ => return None,
        };
        self.fields.iter().position(|f| &f.subject == subject)
    }

    /// Handle one key press.
    pub fn handle_input(&mut self, key_event: KeyEvent) -> InputResult {
        match key_event.code {
            KeyCode::Enter => {
                if self.on_last_field() {
                    return self.submit();
                }
                self.focus_next();
            }
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Backspace => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.pop();
                }
            }
            KeyCode::Char(c)
                if !key_event.modifiers.contains(KeyModifiers::CONTROL)
                    && (c.is_ascii_digit() || c == '.') =>
            {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    if field.value.len() < MAX_FIELD_LEN {
                        field.value.push(c);
                        self.error = None;
                    }
                }
            }
            _ => {}
        }
        InputResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_course;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut MarksForm, text: &str) {
        for c in text.chars() {
            form.handle_input(key(KeyCode::Char(c)));
        }
    }

    fn pcm_form() -> MarksForm {
        MarksForm::for_course(find_course("B.Tech CSE").expect("catalog course"))
    }

    #[test]
    fn test_list_cursor_wraps() {
        let mut cursor = ListCursor::new(3);
        cursor.move_up();
        assert_eq!(cursor.selected(), 2);
        cursor.move_down();
        assert_eq!(cursor.selected(), 0);
        cursor.page_down(10);
        assert_eq!(cursor.selected(), 2);
        cursor.home();
        assert_eq!(cursor.selected(), 0);
    }

    #[test]
    fn test_empty_cursor_is_inert() {
        let mut cursor = ListCursor::new(0);
        cursor.move_down();
        cursor.move_up();
        cursor.end();
        assert_eq!(cursor.selected(), 0);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_form_has_field_per_subject() {
        let form = pcm_form();
        let subjects: Vec<&str> = form.fields().iter().map(|f| f.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Physics", "Chemistry", "Math"]);
        assert_eq!(form.course(), "B.Tech CSE");
    }

    #[test]
    fn test_enter_advances_then_submits() {
        let mut form = pcm_form();
        type_str(&mut form, "85");
        assert_eq!(form.handle_input(key(KeyCode::Enter)), InputResult::Continue);
        type_str(&mut form, "78");
        form.handle_input(key(KeyCode::Enter));
        type_str(&mut form, "92");

        match form.handle_input(key(KeyCode::Enter)) {
            InputResult::Submit(marks) => assert_eq!(marks.total(), 255.0),
            other => panic!("expected submit, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_letters_and_limits_length() {
        let mut form = pcm_form();
        type_str(&mut form, "8a5");
        assert_eq!(form.fields()[0].value, "85");
        type_str(&mut form, "12345678");
        assert_eq!(form.fields()[0].value.len(), MAX_FIELD_LEN);
    }

    #[test]
    fn test_empty_field_blocks_submit_and_focuses_it() {
        let mut form = pcm_form();
        form.set_value(0, "85");
        form.set_value(2, "92");
        assert_eq!(form.submit(), InputResult::Continue);
        assert_eq!(form.focus(), 1);
        assert!(form.error().unwrap_or_default().contains("Chemistry"));
    }

    #[test]
    fn test_out_of_range_blocks_submit() {
        let mut form = pcm_form();
        form.set_value(0, "85");
        form.set_value(1, "101");
        form.set_value(2, "92");
        assert_eq!(form.submit(), InputResult::Continue);
        assert!(form.error().unwrap_or_default().contains("between 0 and 100"));
    }

    #[test]
    fn test_typing_clears_error() {
        let mut form = pcm_form();
        form.submit();
        assert!(form.error().is_some());
        type_str(&mut form, "1");
        assert!(form.error().is_none());
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut form = pcm_form();
        form.handle_input(key(KeyCode::Up));
        assert_eq!(form.focus(), 2);
        form.handle_input(key(KeyCode::Tab));
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn test_decimal_scores_accepted() {
        let mut form = MarksForm::with_subjects("Test", ["Math"]);
        type_str(&mut form, "87.5");
        match form.submit() {
            InputResult::Submit(marks) => assert_eq!(marks.get("Math"), Some(87.5)),
            other => panic!("expected submit, got {:?}", other),
        }
    }

    #[test]
    fn test_form_without_subjects_cannot_submit() {
        let mut form = MarksForm::with_subjects("Empty", []);
        assert_eq!(form.submit(), InputResult::Continue);
        assert!(form.error().is_some());
    }
}
