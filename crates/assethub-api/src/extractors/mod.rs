//! Custom Axum extractors.

pub mod caller;
pub mod path;

pub use caller::CallerContext;
pub use path::IdPath;
