//! # assethub-service
//!
//! Business logic for AssetHub. Services validate input, consult the
//! [`MutationPolicy`](assethub_auth::MutationPolicy), and delegate storage to
//! the store traits.
//!
//! Services follow constructor injection: stores and collaborators are
//! provided at construction time as `Arc` trait objects.

pub mod context;
pub mod conversion;
pub mod directory;
pub mod file;

pub use context::RequestContext;
pub use conversion::ConversionService;
pub use directory::{CreateDirectoryRequest, DirectoryService, ListDirectoriesRequest};
pub use file::{
    CreateFileRequest, FileService, ListFilesRequest, ReviseFileRequest, VersionResolver,
};
