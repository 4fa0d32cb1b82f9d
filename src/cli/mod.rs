//! CLI definitions.

pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use gold_core::types::Period;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gold")]
#[command(author, version, about = "Gold price dashboard with a locally cached price history")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configuration file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bring the local price cache up to date
    Refresh(RefreshArgs),
    /// Show the latest prices per ounce and per gram
    Home(HomeArgs),
    /// Show statistics and the price history
    Analyze(AnalyzeArgs),
    /// Predict the next close from the given session values
    Predict(PredictArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct RefreshArgs {
    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct HomeArgs {
    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Number of recent sessions to show
    #[arg(short = 'n', long)]
    pub days: Option<usize>,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Aggregation of the history table (daily, monthly, quarterly, yearly)
    #[arg(short, long, default_value = "daily")]
    pub period: Period,

    /// First date of the range table (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,

    /// Last date of the range table (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Save the JSON report to a file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct PredictArgs {
    /// Session open
    #[arg(long)]
    pub open: f64,

    /// Session high
    #[arg(long)]
    pub high: f64,

    /// Session low
    #[arg(long)]
    pub low: f64,

    /// Session volume
    #[arg(long)]
    pub volume: f64,

    /// Model file (overrides the configuration file)
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}
