//! Directory domain entities.

pub mod model;
pub mod query;

pub use model::{CreateDirectory, Directory};
pub use query::{DirectoryQuery, DirectorySort};
