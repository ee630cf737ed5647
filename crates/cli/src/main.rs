//! # OKR Tracker CLI
//!
//! Command-line interface for the OKR tracker backend.
//!
//! ## Usage
//!
//! ```bash
//! okr serve              # Start the API server (runs migrations automatically)
//! okr migrate            # Apply pending migrations
//! okr migrate --status   # List applied and pending migrations
//! okr validate           # Check configuration
//! okr --help             # Show help
//! ```

mod commands;
mod config;
mod server;

use clap::{CommandFactory as _, Parser};
use commands::Commands;
use error::{AppError, Result, ResultExt as _};

/// OKR tracker - objectives, key results and the work behind them
#[derive(Parser, Debug)]
#[command(name = "okr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level or filter directives (debug, info, `server=debug,sea_orm=warn`)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info", global = true)]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(long, env = "OKR_LOG_FORMAT", default_value = "pretty", global = true)]
    log_format: String,

    /// Also write logs to this file
    #[arg(long, env = "OKR_LOG_FILE", global = true)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Commands::Completions(args) = &cli.command {
        return commands::completions::completions(args.shell, &mut Cli::command());
    }

    let _log_guard = logging::init(&cli.log_level, &cli.log_format, cli.log_file.as_deref())
        .map_err(|e| AppError::config(format!("Failed to initialize logging: {}", e)))?;

    logging::info!(target: "app", command = ?cli.command, "OKR tracker CLI starting...");

    let result = run(cli.command).await;
    match &result {
        Ok(()) => logging::info!(target: "app", "OKR tracker CLI completed successfully"),
        Err(e) => logging::error!(target: "app", code = e.code(), error = %e.message(), "Command failed"),
    }
    result
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Serve(args) => {
            let config = migration::load_config_from_env().context("Loading database configuration")?;
            server::serve(&config, &args).await
        },
        Commands::Migrate(args) => {
            let config = migration::load_config_from_env().context("Loading database configuration")?;
            commands::migrate::migrate(&config, args).await
        },
        Commands::Validate(args) => commands::validate::validate(&args.serve, args.check_connection).await,
        Commands::Completions(args) => commands::completions::completions(args.shell, &mut Cli::command()),
    }
}
