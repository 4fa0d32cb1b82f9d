//! Gold price dashboard CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use gold_config::load_config;
use gold_monitor::{setup_logging, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; flags win over the configuration file
    let logging = load_config(&cli.config).map(|c| c.logging).unwrap_or_default();
    let log_level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or(logging.level);
    let log_format = if cli.json_logs {
        LogFormat::Json
    } else {
        logging.format.parse().unwrap_or_default()
    };
    setup_logging(&log_level, log_format);

    // Execute command
    match cli.command {
        Commands::Refresh(args) => cli::commands::refresh::run(args, &cli.config).await,
        Commands::Home(args) => cli::commands::home::run(args, &cli.config).await,
        Commands::Analyze(args) => cli::commands::analyze::run(args, &cli.config).await,
        Commands::Predict(args) => cli::commands::predict::run(args, &cli.config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
