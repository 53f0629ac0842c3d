//! File version domain entities.

pub mod model;
pub mod query;

pub use model::{CreateFile, File, ReviseFile};
pub use query::{FileQuery, FileSort};
