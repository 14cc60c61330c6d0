//! admitui - Main entry point
//!
//! Interactive admission predictor wizard plus a few headless commands.

use admitui::app::App;
use admitui::catalog;
use admitui::cli::{Cli, Commands, ConfigCommands};
use admitui::error::AdmitError;
use admitui::marks::SubjectMarks;
use admitui::prediction::report::format_report;
use admitui::{GeminiClient, PredictorConfig, WizardController, WizardStep};
use anyhow::{bail, Context};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize tracing. The wizard owns the terminal, so interactive runs log
/// to a file; headless commands log to stderr.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let log_path = match (&cli.log_file, cli.is_interactive()) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(default_log_path()),
        (None, false) => None,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_path {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("admitui.log")
}

/// Main application entry point
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    init_logging(&cli)?;
    info!("admitui starting up");

    let config_path = cli.config.as_deref();
    match cli.command {
        None | Some(Commands::Run) => {
            info!("Launching interactive wizard");
            run_tui(config_path)?;
        }
        Some(Commands::Predict {
            course,
            quota,
            gender,
            marks,
            model,
            json,
        }) => {
            let request = HeadlessRequest {
                course,
                quota,
                gender,
                marks,
                model,
                json,
            };
            run_predict(config_path, request)?;
        }
        Some(Commands::Catalog) => print_catalog(),
        Some(Commands::Config { action }) => match action {
            ConfigCommands::Init { path, force } => init_config(&path, force)?,
            ConfigCommands::Validate { path } => validate_config(&path),
        },
    }

    Ok(())
}

/// Build the live prediction client from the configuration and environment
fn build_client(config: &PredictorConfig) -> anyhow::Result<GeminiClient> {
    let api_key = config.resolve_api_key()?;
    let client = GeminiClient::from_config(config, api_key).map_err(AdmitError::from)?;
    debug!(url = client.url(), "Prediction client ready");
    Ok(client)
}

/// Run the interactive wizard
fn run_tui(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = PredictorConfig::load_or_default(config_path)?;
    let client = build_client(&config)?;

    debug!("Initializing terminal for TUI mode");
    enable_raw_mode()
        .map_err(|e| AdmitError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    if let Err(e) = crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(AdmitError::terminal(format!("Failed to enter alternate screen: {}", e)).into());
    }

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| AdmitError::terminal(format!("Failed to create terminal: {}", e)))
        .and_then(|mut terminal| {
            let mut app = App::new(Arc::new(client));
            app.run(&mut terminal)
        });

    // Always restore the terminal, even if the app failed
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    if let Err(e) = &result {
        error!("Wizard exited with error: {}", e);
    }
    result.map_err(Into::into)
}

/// Arguments of the `predict` command
struct HeadlessRequest {
    course: String,
    quota: String,
    gender: String,
    marks: Vec<String>,
    model: Option<String>,
    json: bool,
}

/// Drive the wizard without a terminal UI and print the outcome
fn run_predict(config_path: Option<&Path>, request: HeadlessRequest) -> anyhow::Result<()> {
    let mut config = PredictorConfig::load_or_default(config_path)?;
    if let Some(model) = request.model {
        config.model = model;
        config.validate()?;
    }

    let quota = request.quota.trim().to_lowercase();
    if !catalog::quotas().contains(&quota) {
        bail!(
            "Unknown quota '{}'. Choose one of: {}",
            request.quota,
            catalog::quotas().join(", ")
        );
    }
    let gender = request.gender.trim().to_lowercase();
    if !catalog::genders().contains(&gender) {
        bail!(
            "Unknown gender '{}'. Choose one of: {}",
            request.gender,
            catalog::genders().join(", ")
        );
    }
    if catalog::find_course(request.course.trim()).is_none() {
        warn!(course = %request.course, "Course is not in the built-in catalog");
    }

    let mut marks = SubjectMarks::new();
    for raw in &request.marks {
        let (subject, score) = SubjectMarks::parse_pair(raw).map_err(AdmitError::from)?;
        marks.insert(subject, score).map_err(AdmitError::from)?;
    }
    marks.validate_range(catalog::MAX_SUBJECT_SCORE).map_err(AdmitError::from)?;

    let client = build_client(&config)?;
    let mut wizard = WizardController::new();
    wizard.select_course(&request.course)?;
    wizard.select_quota(&quota)?;
    wizard.select_gender(&gender)?;

    info!(total = marks.total(), "Requesting prediction");
    let step = wizard.submit_with(&client, marks)?;

    match (step, wizard.prediction()) {
        (WizardStep::Result, Some(result)) => {
            if request.json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                for line in format_report(result) {
                    println!("{}", line);
                }
            }
            Ok(())
        }
        _ => {
            let message = wizard
                .error_message()
                .unwrap_or("The prediction did not produce a result");
            error!("Prediction failed: {}", message);
            eprintln!("✗ {}", message);
            std::process::exit(1);
        }
    }
}

fn print_catalog() {
    println!("Courses:");
    for course in catalog::courses() {
        println!("  {}", course.display_line());
        println!("      subjects: {}", course.subjects.join(", "));
    }
    println!();
    println!("Quotas:  {}", catalog::quotas().join(", "));
    println!("Genders: {}", catalog::genders().join(", "));
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    PredictorConfig::default().save_to_file(path)?;
    info!("Wrote default configuration to {}", path.display());
    println!("✓ Wrote default configuration to {}", path.display());
    Ok(())
}

fn validate_config(path: &Path) {
    info!("Validating configuration file: {:?}", path);
    match PredictorConfig::load_from_file(path) {
        Ok(config) => match config.validate() {
            Ok(()) => {
                info!("Configuration validation successful");
                println!("✓ Configuration file is valid: {}", path.display());
            }
            Err(e) => {
                error!("Configuration validation failed: {:#}", e);
                eprintln!("✗ Configuration validation failed: {:#}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to load configuration file: {:#}", e);
            eprintln!("✗ Failed to load configuration file: {:#}", e);
            std::process::exit(1);
        }
    }
}
