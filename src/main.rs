//! AssetHub Server: project-scoped directories and versioned 3D assets
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use assethub_api::app::build_app;
use assethub_api::state::AppState;
use assethub_converter::CommandMeshConverter;
use assethub_core::config::{AppConfig, StoreBackend};
use assethub_core::error::AppError;
use assethub_database::{
    DatabasePool, DirectoryRepository, DirectoryStore, FileRepository, FileStore, MemoryStore,
};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `ASSETHUB_CONFIG`, or from the default file
/// plus the `ASSETHUB_ENV` overlay.
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("ASSETHUB_CONFIG") {
        Ok(path) => AppConfig::load(&path),
        Err(_) => {
            let env = std::env::var("ASSETHUB_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load_env(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        store = %config.store.backend,
        "Starting AssetHub"
    );

    // ── Step 1: Scratch space for the converter ──────────────────
    tokio::fs::create_dir_all(&config.conversion.work_dir)
        .await
        .map_err(|e| {
            AppError::internal(format!(
                "Failed to create conversion work dir '{}': {e}",
                config.conversion.work_dir
            ))
        })?;

    // ── Step 2: Stores ───────────────────────────────────────────
    let (directories, files, db_pool): (Arc<dyn DirectoryStore>, Arc<dyn FileStore>, _) =
        match config.store.backend {
            StoreBackend::Postgres => {
                let pool =
                    DatabasePool::connect(&config.database, config.store.run_migrations).await?;
                let directories: Arc<dyn DirectoryStore> =
                    Arc::new(DirectoryRepository::new(pool.pool().clone()));
                let files: Arc<dyn FileStore> = Arc::new(FileRepository::new(pool.pool().clone()));
                (directories, files, Some(pool))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using the in-memory store; data is lost on restart");
                let store = Arc::new(MemoryStore::new());
                let directories: Arc<dyn DirectoryStore> = store.clone();
                let files: Arc<dyn FileStore> = store;
                (directories, files, None)
            }
        };

    // ── Step 3: Converter ────────────────────────────────────────
    let converter = Arc::new(CommandMeshConverter::new(&config.conversion));

    // ── Step 4: State and router ─────────────────────────────────
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let addr = config.server.bind_address();

    let mut state = AppState::new(config, directories, files, converter);
    if let Some(pool) = db_pool.clone() {
        state = state.with_db_pool(pool);
    }
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "AssetHub server listening");

    // ── Step 5: Serve until a shutdown signal ────────────────────
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => {
            return finish_server(joined);
        }
        () = shutdown_signal() => {}
    }

    tracing::info!(
        grace_seconds = grace.as_secs(),
        "Shutdown signal received, draining in-flight requests"
    );
    let _ = shutdown_tx.send(true);

    let result = match tokio::time::timeout(grace, server).await {
        Ok(joined) => finish_server(joined),
        Err(_) => {
            tracing::warn!("Grace period elapsed with requests still in flight");
            Ok(())
        }
    };

    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("AssetHub server shut down");
    result
}

fn finish_server(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AppError::internal(format!("Server error: {e}"))),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
