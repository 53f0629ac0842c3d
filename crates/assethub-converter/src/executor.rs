//! Child process execution for mesh conversions.
//!
//! Executes an external conversion tool with timeout management and
//! output capturing.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::process::Command;

use assethub_core::error::{AppError, ErrorKind};

/// Errors from conversion execution
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The conversion command was not found
    #[error("Conversion command not found: {0}")]
    CommandNotFound(String),

    /// The conversion process timed out
    #[error("Conversion timed out after {0} seconds")]
    Timeout(u64),

    /// The conversion process exited with a non-zero code
    #[error("Conversion failed with exit code {code}: {stderr}")]
    ProcessFailed {
        /// The exit code
        code: i32,
        /// Standard error output
        stderr: String,
    },

    /// IO error during conversion
    #[error("IO error during conversion: {0}")]
    IoError(#[from] std::io::Error),

    /// Output file was not created
    #[error("Expected output file not created: {0}")]
    OutputMissing(String),
}

impl From<ExecutorError> for AppError {
    fn from(err: ExecutorError) -> Self {
        let message = err.to_string();
        AppError::with_source(ErrorKind::ExternalService, message, err)
    }
}

/// Result of a conversion execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Path to the output file
    pub output_path: PathBuf,
    /// Standard error from the process
    pub stderr: String,
    /// Duration of the conversion
    pub duration_ms: u64,
    /// Output file size in bytes
    pub output_size: u64,
}

/// Parameters for executing a conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// The command to execute
    pub command: String,
    /// Arguments (after placeholder substitution)
    pub args: Vec<String>,
    /// Timeout in seconds
    pub timeout_seconds: u64,
    /// Path to the input file
    pub input_path: PathBuf,
    /// Path where output should be written
    pub output_path: PathBuf,
}

/// Runs external conversion commands inside per-job scratch directories.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    work_dir: PathBuf,
}

impl CommandExecutor {
    /// Create a new executor rooted at `work_dir`.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// Substitute `{input}`, `{output}`, `{input_dir}` and `{output_dir}` in arguments.
    pub fn substitute_args(
        template_args: &[String],
        input_path: &Path,
        output_path: &Path,
    ) -> Vec<String> {
        let input_str = input_path.to_string_lossy();
        let output_str = output_path.to_string_lossy();
        let input_dir = input_path
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();
        let output_dir = output_path
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();

        template_args
            .iter()
            .map(|arg| {
                arg.replace("{input}", &input_str)
                    .replace("{output}", &output_str)
                    .replace("{input_dir}", &input_dir)
                    .replace("{output_dir}", &output_dir)
            })
            .collect()
    }

    /// Execute a conversion command and require that it produced its output file.
    pub async fn execute(&self, params: &ExecutionParams) -> Result<ExecutionResult, ExecutorError> {
        let start = Instant::now();

        tracing::debug!(
            command = %params.command,
            args = ?params.args,
            input = %params.input_path.display(),
            output = %params.output_path.display(),
            "Executing conversion"
        );

        if let Some(parent) = params.output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut cmd = Command::new(&params.command);
        cmd.args(&params.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let timeout = Duration::from_secs(params.timeout_seconds);
        let result = tokio::time::timeout(timeout, cmd.output()).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let output = match result {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::error!(command = %params.command, "Conversion command not found");
                return Err(ExecutorError::CommandNotFound(params.command.clone()));
            }
            Ok(Err(e)) => {
                tracing::error!(command = %params.command, error = %e, "Failed to execute conversion command");
                return Err(ExecutorError::IoError(e));
            }
            Err(_) => {
                tracing::error!(
                    command = %params.command,
                    timeout_seconds = params.timeout_seconds,
                    "Conversion timed out"
                );
                return Err(ExecutorError::Timeout(params.timeout_seconds));
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            tracing::error!(
                command = %params.command,
                exit_code = code,
                stderr = %stderr.chars().take(500).collect::<String>(),
                "Conversion failed"
            );
            return Err(ExecutorError::ProcessFailed {
                code,
                stderr: stderr.chars().take(2000).collect(),
            });
        }

        let output_size = match tokio::fs::metadata(&params.output_path).await {
            Ok(meta) => meta.len(),
            Err(_) => {
                tracing::warn!(
                    output = %params.output_path.display(),
                    "Conversion command succeeded but output file not found"
                );
                return Err(ExecutorError::OutputMissing(
                    params.output_path.display().to_string(),
                ));
            }
        };

        tracing::info!(
            command = %params.command,
            duration_ms,
            output_size,
            "Conversion completed"
        );

        Ok(ExecutionResult {
            output_path: params.output_path.clone(),
            stderr,
            duration_ms,
            output_size,
        })
    }

    /// Get the scratch root
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Create a scratch directory for one job
    pub async fn create_job_dir(&self, job_id: &str) -> Result<PathBuf, ExecutorError> {
        let dir = self.work_dir.join(job_id);
        tokio::fs::create_dir_all(&dir).await?;
        Ok(dir)
    }

    /// Remove a job's scratch directory
    pub async fn cleanup_job_dir(&self, job_id: &str) -> Result<(), ExecutorError> {
        let dir = self.work_dir.join(job_id);
        if tokio::fs::try_exists(&dir).await? {
            tokio::fs::remove_dir_all(&dir).await?;
        }
        Ok(())
    }
}
