use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// admitui - BHU admission chance predictor
#[derive(Parser)]
#[command(name = "admitui")]
#[command(about = "Estimate BHU undergraduate admission chances from your marks")]
#[command(version)]
pub struct Cli {
    /// Path to a predictor configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file. Interactive mode defaults to admitui.log in
    /// the temp directory; other commands log to stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log filter (e.g. "info", "admitui=debug"). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive wizard (default)
    Run,
    /// Request a prediction without the interactive wizard
    Predict {
        /// Course name as listed by `admitui catalog`
        #[arg(long)]
        course: String,
        /// Admission quota (general, obc, sc, st, ews, pwd, ward)
        #[arg(long)]
        quota: String,
        /// Gender (male, female, other)
        #[arg(long)]
        gender: String,
        /// Subject marks as SUBJECT=SCORE, repeatable
        #[arg(long = "mark", value_name = "SUBJECT=SCORE", required = true)]
        marks: Vec<String>,
        /// Override the configured model
        #[arg(long)]
        model: Option<String>,
        /// Print the raw result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// List courses, quotas and genders
    Catalog,
    /// Manage the predictor configuration file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a configuration file with default settings
    Init {
        /// Destination path
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        path: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// True when the interactive wizard will run.
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Run))
    }
}
