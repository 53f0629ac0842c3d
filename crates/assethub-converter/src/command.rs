//! [`MeshConverter`] backed by an external command.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use assethub_core::config::ConversionConfig;
use assethub_core::result::AppResult;
use assethub_core::traits::converter::{ConversionInput, ConversionOutput, MeshConverter};

use crate::executor::{CommandExecutor, ExecutionParams, ExecutorError};

const INPUT_FILE: &str = "input.obj";
const OUTPUT_FILE: &str = "output.gltf";
const GLTF_MIME: &str = "model/gltf+json";

/// Converts OBJ payloads to glTF by running the configured tool.
///
/// Each call gets its own scratch directory under `work_dir`, removed
/// whether or not the conversion succeeds.
#[derive(Debug, Clone)]
pub struct CommandMeshConverter {
    executor: CommandExecutor,
    command: String,
    args: Vec<String>,
    timeout_seconds: u64,
}

impl CommandMeshConverter {
    /// Build a converter from configuration.
    pub fn new(config: &ConversionConfig) -> Self {
        Self {
            executor: CommandExecutor::new(&config.work_dir),
            command: config.command.clone(),
            args: config.args.clone(),
            timeout_seconds: config.timeout_seconds,
        }
    }

    async fn run_job(&self, job_dir: &Path, payload: &[u8]) -> AppResult<Bytes> {
        let input_path = job_dir.join(INPUT_FILE);
        let output_path = job_dir.join(OUTPUT_FILE);
        tokio::fs::write(&input_path, payload)
            .await
            .map_err(ExecutorError::from)?;

        let params = ExecutionParams {
            command: self.command.clone(),
            args: CommandExecutor::substitute_args(&self.args, &input_path, &output_path),
            timeout_seconds: self.timeout_seconds,
            input_path,
            output_path,
        };
        let result = self.executor.execute(&params).await?;

        let bytes = tokio::fs::read(&result.output_path)
            .await
            .map_err(ExecutorError::from)?;
        Ok(Bytes::from(bytes))
    }
}

#[async_trait]
impl MeshConverter for CommandMeshConverter {
    fn source_extension(&self) -> &str {
        "obj"
    }

    async fn convert(&self, input: ConversionInput) -> AppResult<ConversionOutput> {
        let job_id = Uuid::new_v4().to_string();
        let job_dir = self.executor.create_job_dir(&job_id).await?;

        let outcome = self.run_job(&job_dir, &input.payload).await;

        if let Err(e) = self.executor.cleanup_job_dir(&job_id).await {
            tracing::warn!(job_id = %job_id, error = %e, "Failed to remove conversion scratch directory");
        }

        let payload = outcome?;
        Ok(ConversionOutput {
            file_name: output_name(&input.file_name),
            mime_type: GLTF_MIME.to_string(),
            payload,
        })
    }
}

/// `cube.obj` → `cube.gltf`.
fn output_name(file_name: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(file_name);
    format!("{stem}.gltf")
}
