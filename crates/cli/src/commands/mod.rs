//! # CLI Commands
//!
//! Subcommands of the `okr` binary.

pub mod completions;
pub mod migrate;
pub mod validate;

use clap::{Args, Subcommand};

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server (applies pending migrations first)
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Verify configuration without starting anything
    Validate(ValidateArgs),
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Server host to bind to
    #[arg(long, env = "OKR_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port to bind to
    #[arg(short, long, env = "OKR_PORT", default_value = "8000")]
    pub port: u16,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Roll back the last applied migration
    #[arg(long, conflicts_with = "status")]
    pub rollback: bool,

    /// List applied and pending migrations without changing anything
    #[arg(long)]
    pub status: bool,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub serve: ServeArgs,

    /// Also open a connection to the database
    #[arg(long)]
    pub check_connection: bool,
}

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
