//! # assethub-api
//!
//! HTTP API layer for AssetHub built on Axum.
//!
//! Provides the REST endpoints for directories, file version chains, and
//! mesh conversion, together with the caller extractor, request logging,
//! CORS, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
