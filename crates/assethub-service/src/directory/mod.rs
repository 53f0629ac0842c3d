//! Directory tree operations.

pub mod service;

pub use service::{CreateDirectoryRequest, DirectoryService, ListDirectoriesRequest};
