//! HTTP request handlers.

pub mod convert;
pub mod directory;
pub mod file;
pub mod health;
