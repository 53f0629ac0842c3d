//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use assethub_auth::{JwtDecoder, MutationPolicy};
use assethub_core::config::AppConfig;
use assethub_core::traits::converter::MeshConverter;
use assethub_database::DatabasePool;
use assethub_database::store::{DirectoryStore, FileStore};
use assethub_service::{ConversionService, DirectoryService, FileService, VersionResolver};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When the process started serving
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, when the postgres backend is active
    pub db_pool: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token verifier
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Directory tree operations
    pub directory_service: Arc<DirectoryService>,
    /// File chain operations
    pub file_service: Arc<FileService>,
    /// Version history resolution
    pub version_resolver: Arc<VersionResolver>,
    /// Mesh conversion
    pub conversion_service: Arc<ConversionService>,
}

impl AppState {
    /// Wire services over the given stores and converter.
    pub fn new(
        config: AppConfig,
        directories: Arc<dyn DirectoryStore>,
        files: Arc<dyn FileStore>,
        converter: Arc<dyn MeshConverter>,
    ) -> Self {
        let policy = MutationPolicy::from(&config.policy);

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            directory_service: Arc::new(DirectoryService::new(Arc::clone(&directories), policy)),
            file_service: Arc::new(FileService::new(
                Arc::clone(&files),
                Arc::clone(&directories),
                policy,
            )),
            version_resolver: Arc::new(VersionResolver::new(files)),
            conversion_service: Arc::new(ConversionService::new(
                converter,
                config.conversion.max_input_bytes,
            )),
            db_pool: None,
            started_at: Instant::now(),
            config: Arc::new(config),
        }
    }

    /// Attach the database pool so health checks can probe it.
    pub fn with_db_pool(mut self, pool: DatabasePool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
