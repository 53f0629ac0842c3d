//! Core type definitions used across the AssetHub workspace.

pub mod filter;
pub mod id;
pub mod sorting;

pub use filter::{NULL_SENTINEL, ScopeFilter};
pub use id::*;
pub use sorting::{SortDirection, SortField};
