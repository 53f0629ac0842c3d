//! # assethub-converter
//!
//! Runs an external mesh conversion tool (by default `obj2gltf`) as a child
//! process and exposes it through the core
//! [`MeshConverter`](assethub_core::traits::MeshConverter) hook.

pub mod command;
pub mod executor;

pub use command::CommandMeshConverter;
pub use executor::{CommandExecutor, ExecutionParams, ExecutionResult, ExecutorError};
