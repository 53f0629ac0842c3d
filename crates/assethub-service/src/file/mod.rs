//! File version chain operations.

pub mod service;
pub mod version;

pub use service::{CreateFileRequest, FileService, ListFilesRequest, ReviseFileRequest};
pub use version::VersionResolver;
