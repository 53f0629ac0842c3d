//! File and version chain inspection commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use assethub_auth::MutationPolicy;
use assethub_core::error::AppError;
use assethub_core::types::filter::ScopeFilter;
use assethub_core::types::id::{FileId, ProjectId};
use assethub_database::{DirectoryRepository, FileRepository};
use assethub_entity::file::File;
use assethub_service::{FileService, ListFilesRequest, VersionResolver};

use crate::output::{self, OutputFormat};

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List files of a project
    List {
        /// Project ID
        #[arg(short, long)]
        project: ProjectId,
        /// Directory ID, or `null` for the project root only
        #[arg(short, long)]
        directory: Option<String>,
        /// Include superseded versions
        #[arg(long)]
        all_versions: bool,
        /// Name substring
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show the full version chain containing a file
    Versions {
        /// Any file ID in the chain
        id: FileId,
    },
    /// Show the latest version of the chain containing a file
    Latest {
        /// Any file ID in the chain
        id: FileId,
    },
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// File ID
    id: String,
    /// Name
    name: String,
    /// Version
    version: i32,
    /// Latest
    latest: String,
    /// Size
    size: i64,
    /// Created at
    created_at: String,
}

impl From<&File> for FileRow {
    fn from(f: &File) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            version: f.version_number,
            latest: if f.is_latest { "yes" } else { "" }.to_string(),
            size: f.size_bytes,
            created_at: f.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute file commands
pub async fn execute(args: &FileArgs, config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::connect(&config).await?;
    let files = Arc::new(FileRepository::new(pool.pool().clone()));

    let rows: Vec<File> = match &args.command {
        FileCommand::List {
            project,
            directory,
            all_versions,
            search,
        } => {
            let service = FileService::new(
                files,
                Arc::new(DirectoryRepository::new(pool.pool().clone())),
                MutationPolicy::strict(),
            );
            service
                .list(ListFilesRequest {
                    project_id: Some(*project),
                    directory: ScopeFilter::parse("directory", directory.as_deref())?,
                    latest_only: Some(!all_versions),
                    search: search.clone(),
                    ordering: None,
                })
                .await?
        }
        FileCommand::Versions { id } => VersionResolver::new(files).list_versions(*id).await?,
        FileCommand::Latest { id } => vec![VersionResolver::new(files).latest_version(*id).await?],
    };

    let rows: Vec<FileRow> = rows.iter().map(FileRow::from).collect();
    output::print_list(&rows, format);

    pool.close().await;
    Ok(())
}
