//! # assethub-database
//!
//! Storage for the directory tree and the file version chains.
//!
//! The [`store`] module defines the two store traits. Two backends
//! implement them: sqlx-backed PostgreSQL repositories, and an in-memory
//! store for single-node deployments and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::{DirectoryRepository, FileRepository};
pub use store::{DirectoryStore, FileStore, SubtreeDeletion};
