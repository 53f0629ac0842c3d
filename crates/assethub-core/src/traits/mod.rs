//! Core traits defined in `assethub-core` and implemented by other crates.

pub mod converter;

pub use converter::{ConversionInput, ConversionOutput, MeshConverter};
