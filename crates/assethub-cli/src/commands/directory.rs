//! Directory tree inspection commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use assethub_auth::MutationPolicy;
use assethub_core::error::AppError;
use assethub_core::types::filter::ScopeFilter;
use assethub_core::types::id::ProjectId;
use assethub_database::DirectoryRepository;
use assethub_entity::directory::Directory;
use assethub_service::{DirectoryService, ListDirectoriesRequest};

use crate::output::{self, OutputFormat};

/// Arguments for directory commands
#[derive(Debug, Args)]
pub struct DirectoryArgs {
    /// Directory subcommand
    #[command(subcommand)]
    pub command: DirectoryCommand,
}

/// Directory subcommands
#[derive(Debug, Subcommand)]
pub enum DirectoryCommand {
    /// List directories of a project
    List {
        /// Project ID
        #[arg(short, long)]
        project: ProjectId,
        /// Parent directory ID, or `null` for top-level only
        #[arg(long)]
        parent: Option<String>,
        /// Name substring
        #[arg(short, long)]
        search: Option<String>,
        /// Ordering, e.g. `name` or `-created_at`
        #[arg(short, long)]
        ordering: Option<String>,
    },
}

/// Directory display row
#[derive(Debug, Serialize, Tabled)]
struct DirectoryRow {
    /// Directory ID
    id: String,
    /// Name
    name: String,
    /// Parent
    parent: String,
    /// Created at
    created_at: String,
}

impl From<&Directory> for DirectoryRow {
    fn from(d: &Directory) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.name.clone(),
            parent: d.parent_id.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
            created_at: d.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute directory commands
pub async fn execute(
    args: &DirectoryArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::connect(&config).await?;
    let service = DirectoryService::new(
        Arc::new(DirectoryRepository::new(pool.pool().clone())),
        MutationPolicy::strict(),
    );

    match &args.command {
        DirectoryCommand::List {
            project,
            parent,
            search,
            ordering,
        } => {
            let directories = service
                .list(ListDirectoriesRequest {
                    project_id: Some(*project),
                    parent: ScopeFilter::parse("parent", parent.as_deref())?,
                    search: search.clone(),
                    ordering: ordering.clone(),
                })
                .await?;

            let rows: Vec<DirectoryRow> = directories.iter().map(DirectoryRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    pool.close().await;
    Ok(())
}
