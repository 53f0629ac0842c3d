//! Mesh conversion pass-through.

pub mod service;

pub use service::ConversionService;
