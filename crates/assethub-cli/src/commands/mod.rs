//! CLI command definitions and dispatch.

pub mod directory;
pub mod file;
pub mod migrate;
pub mod token;

use clap::{Parser, Subcommand};

use assethub_core::config::AppConfig;
use assethub_core::error::AppError;
use assethub_database::DatabasePool;

use crate::output::OutputFormat;

/// AssetHub: project-scoped directories and versioned files
#[derive(Debug, Parser)]
#[command(name = "assethub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Inspect the directory tree
    Directories(directory::DirectoryArgs),
    /// Inspect files and version chains
    Files(file::FileArgs),
    /// Issue bearer tokens for development
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Directories(args) => directory::execute(args, &self.config, self.format).await,
            Commands::Files(args) => file::execute(args, &self.config, self.format).await,
            Commands::Token(args) => token::execute(args, &self.config),
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: open the database named in the configuration
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    if config.database.url.trim().is_empty() {
        return Err(AppError::configuration(
            "database.url is required for CLI commands",
        ));
    }
    DatabasePool::connect(&config.database, false).await
}
