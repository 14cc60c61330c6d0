//! Application module
//!
//! Contains the main application loop, key handling and the prediction worker.
//!
//! # Module Structure
//! - `state` - View state types (AppState, AppMode)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppMode, AppState};

use crate::catalog;
use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::error::{AdmitError, Result};
use crate::input::{InputResult, ListCursor, MarksForm};
use crate::marks::SubjectMarks;
use crate::prediction::{PredictionClient, PredictionError, PredictionResult};
use crate::theme::UiConstants;
use crate::ui::UiRenderer;
use crate::wizard_state::{RequestTicket, Screen, WizardController, WizardError, WizardStep};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Messages sent from the prediction worker thread to the main UI thread
#[derive(Debug)]
pub enum PredictionMessage {
    /// The request identified by `ticket` finished
    Completed {
        ticket: RequestTicket,
        outcome: std::result::Result<PredictionResult, PredictionError>,
    },
}

/// Main application struct
pub struct App {
    wizard: WizardController,
    state: AppState,
    client: Arc<dyn PredictionClient>,
    ui_renderer: UiRenderer,
    /// Keybinding context for dispatch and navigation hints
    keybinding_context: KeybindingContext,
    /// Channel sender for prediction outcomes (cloned to worker threads)
    prediction_tx: Sender<PredictionMessage>,
    /// Channel receiver for prediction outcomes (polled in main loop)
    prediction_rx: Receiver<PredictionMessage>,
}

impl App {
    /// Create a new application instance
    pub fn new(client: Arc<dyn PredictionClient>) -> Self {
        info!("Creating new App instance");
        let (prediction_tx, prediction_rx) = mpsc::channel();

        Self {
            wizard: WizardController::new(),
            state: AppState::default(),
            client,
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
            prediction_tx,
            prediction_rx,
        }
    }

    pub fn wizard(&self) -> &WizardController {
        &self.wizard
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Current screen as seen by the renderer and key dispatch
    pub fn mode(&self) -> AppMode {
        AppMode::from_screen(self.wizard.screen())
    }

    pub fn keybinding_context(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Toggle help overlay visibility
    pub fn toggle_help(&mut self) {
        self.state.help_visible = !self.state.help_visible;
    }

    /// Apply all prediction outcomes that have arrived, without blocking.
    ///
    /// Returns the number of messages processed.
    pub fn poll_prediction_messages(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(msg) = self.prediction_rx.try_recv() {
            processed += 1;
            match msg {
                PredictionMessage::Completed { ticket, outcome } => {
                    match self.wizard.complete_prediction(ticket, outcome) {
                        Ok(step) => {
                            info!(%ticket, ?step, "Prediction finished");
                            self.state.result_scroll = 0;
                        }
                        Err(WizardError::UnknownRequest { .. }) => {
                            debug!(%ticket, "Ignored outcome of abandoned request");
                        }
                        Err(e) => self.report(e),
                    }
                }
            }
        }
        if processed > 0 {
            self.sync_view();
        }
        processed
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            self.poll_prediction_messages();

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    // Windows reports both press and release
                    if key_event.kind == KeyEventKind::Press && self.handle_key_event(key_event)? {
                        break;
                    }
                }
            }

            if self.wizard.is_loading() {
                self.state.spinner_tick = self.state.spinner_tick.wrapping_add(1);
            }

            self.draw(terminal)?;
        }

        info!("Main application loop finished");
        Ok(())
    }

    /// Render one frame
    pub fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal
            .draw(|f| {
                self.ui_renderer
                    .render(f, &self.wizard, &self.state, &self.keybinding_context);
            })
            .map_err(|e| AdmitError::terminal(format!("Failed to draw frame: {}", e)))?;
        Ok(())
    }

    /// Handle a key press. Returns `Ok(true)` when the user asked to quit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<bool> {
        let mode = self.mode();
        let action = self.keybinding_context.resolve(&mode, &key_event);

        if action == Some(KeyAction::Quit) {
            info!("Quit requested");
            return Ok(true);
        }

        // Help overlay swallows everything except its own dismissal
        if self.state.help_visible {
            if matches!(key_event.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.toggle_help();
            }
            return Ok(false);
        }
        if action == Some(KeyAction::Help) {
            self.toggle_help();
            return Ok(false);
        }

        match mode {
            AppMode::CourseSelection | AppMode::QuotaSelection | AppMode::GenderSelection => {
                self.handle_menu_action(mode, action)
            }
            AppMode::MarksInput => self.handle_marks_key(key_event, action),
            AppMode::Result => self.handle_result_action(action),
            AppMode::ErrorPanel | AppMode::Inconsistent => {
                if action == Some(KeyAction::StartOver) {
                    self.start_over();
                }
            }
            AppMode::Loading => {}
        }

        self.sync_view();
        Ok(false)
    }

    fn handle_menu_action(&mut self, mode: AppMode, action: Option<KeyAction>) {
        let Some(action) = action else {
            return;
        };
        let page = UiConstants::PAGE_SCROLL_SIZE;
        let cursor: &mut ListCursor = match mode {
            AppMode::CourseSelection => &mut self.state.course_menu,
            AppMode::QuotaSelection => &mut self.state.quota_menu,
            _ => &mut self.state.gender_menu,
        };

        match action {
            KeyAction::NavigateUp => cursor.move_up(),
            KeyAction::NavigateDown => cursor.move_down(),
            KeyAction::PageUp => cursor.page_up(page),
            KeyAction::PageDown => cursor.page_down(page),
            KeyAction::Home => cursor.home(),
            KeyAction::End => cursor.end(),
            KeyAction::Select => {
                let index = cursor.selected();
                self.select_current(mode, index);
            }
            KeyAction::Back => {
                let target = match mode {
                    AppMode::GenderSelection => WizardStep::QuotaSelection,
                    _ => WizardStep::CourseSelection,
                };
                self.go_back(target);
            }
            KeyAction::JumpToCourse => self.go_back(WizardStep::CourseSelection),
            KeyAction::JumpToQuota => self.go_back(WizardStep::QuotaSelection),
            _ => {}
        }
    }

    fn select_current(&mut self, mode: AppMode, index: usize) {
        let outcome = match mode {
            AppMode::CourseSelection => match catalog::courses().get(index) {
                Some(course) => self.wizard.select_course(course.name),
                None => return,
            },
            AppMode::QuotaSelection => match catalog::quotas().get(index) {
                Some(quota) => self.wizard.select_quota(quota.as_str()),
                None => return,
            },
            _ => match catalog::genders().get(index) {
                Some(gender) => self.wizard.select_gender(gender.as_str()),
                None => return,
            },
        };
        match outcome {
            Ok(step) => {
                debug!(?step, "Selection accepted");
                self.state.status_message = None;
            }
            Err(e) => self.report(e),
        }
    }

    fn handle_marks_key(&mut self, key_event: KeyEvent, action: Option<KeyAction>) {
        match action {
            Some(KeyAction::Back) => return self.go_back(WizardStep::GenderSelection),
            Some(KeyAction::JumpToCourse) => return self.go_back(WizardStep::CourseSelection),
            Some(KeyAction::JumpToQuota) => return self.go_back(WizardStep::QuotaSelection),
            Some(KeyAction::JumpToGender) => return self.go_back(WizardStep::GenderSelection),
            _ => {}
        }

        let Some(form) = self.state.marks_form.as_mut() else {
            warn!("Marks step shown without a form");
            return;
        };
        let result = match action {
            Some(KeyAction::Submit) if key_event.code != KeyCode::Enter => form.submit(),
            _ => form.handle_input(key_event),
        };
        if let InputResult::Submit(marks) = result {
            self.submit_marks(marks);
        }
    }

    fn handle_result_action(&mut self, action: Option<KeyAction>) {
        let page = UiConstants::PAGE_SCROLL_SIZE;
        let scroll = &mut self.state.result_scroll;
        match action {
            Some(KeyAction::ScrollUp) => *scroll = scroll.saturating_sub(1),
            Some(KeyAction::ScrollDown) => *scroll = scroll.saturating_add(1),
            Some(KeyAction::PageUp) => *scroll = scroll.saturating_sub(page),
            Some(KeyAction::PageDown) => *scroll = scroll.saturating_add(page),
            Some(KeyAction::Home) => *scroll = 0,
            Some(KeyAction::StartOver) => self.start_over(),
            _ => {}
        }
    }

    /// Issue the prediction request on a worker thread.
    fn submit_marks(&mut self, marks: SubjectMarks) {
        let pending = match self.wizard.submit_marks(marks) {
            Ok(pending) => pending,
            Err(e) => return self.report(e),
        };

        let client = Arc::clone(&self.client);
        let tx = self.prediction_tx.clone();
        let ticket = pending.ticket;
        let spawned = thread::Builder::new()
            .name("prediction".to_string())
            .spawn(move || {
                let outcome = client.predict(&pending.request);
                if tx
                    .send(PredictionMessage::Completed { ticket, outcome })
                    .is_err()
                {
                    debug!(%ticket, "UI gone before prediction finished");
                }
            });

        if let Err(e) = spawned {
            warn!(error = %e, "Failed to start prediction worker");
            let outcome = Err(PredictionError::Service(format!(
                "Could not start the prediction request: {}",
                e
            )));
            if let Err(e) = self.wizard.complete_prediction(ticket, outcome) {
                self.report(e);
            }
        }
    }

    fn go_back(&mut self, target: WizardStep) {
        match self.wizard.back(target) {
            Ok(step) => {
                debug!(?step, "Went back");
                self.state.status_message = None;
            }
            Err(e) => self.report(e),
        }
    }

    fn start_over(&mut self) {
        self.wizard.reset();
        self.state.clear();
        info!("Wizard restarted");
    }

    /// Record a rejected event for the status line
    fn report(&mut self, err: WizardError) {
        warn!(error = %err, "Wizard event rejected");
        self.state.status_message = Some(err.to_string());
    }

    /// Keep the marks form in step with the wizard.
    fn sync_view(&mut self) {
        if let Screen::Inconsistent(step) = self.wizard.screen() {
            let missing = self.wizard.selection().missing_for(step);
            warn!(%step, ?missing, "Step shown without its prerequisite selections");
        }
        if self.mode() != AppMode::MarksInput {
            if self.wizard.step() != WizardStep::MarksInput {
                self.state.marks_form = None;
            }
            return;
        }

        let Some(course_name) = self.wizard.selection().course.as_deref() else {
            return;
        };
        let stale = self
            .state
            .marks_form
            .as_ref()
            .is_none_or(|form| form.course() != course_name);
        if stale {
            let form = match catalog::find_course(course_name) {
                Some(course) => MarksForm::for_course(course),
                None => {
                    warn!(course = course_name, "Course not in catalog; no subjects to enter");
                    MarksForm::with_subjects(course_name, [])
                }
            };
            self.state.marks_form = Some(form);
        }
    }
}
