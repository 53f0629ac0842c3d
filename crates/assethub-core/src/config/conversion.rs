//! Mesh conversion configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external OBJ → glTF converter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Executable to run.
    #[serde(default = "default_command")]
    pub command: String,
    /// Argument template. `{input}` and `{output}` are substituted.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    /// Kill the converter after this many seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Scratch directory for input/output files.
    #[serde(default = "default_work_dir")]
    pub work_dir: String,
    /// Largest accepted input payload.
    #[serde(default = "default_max_input")]
    pub max_input_bytes: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: default_args(),
            timeout_seconds: default_timeout(),
            work_dir: default_work_dir(),
            max_input_bytes: default_max_input(),
        }
    }
}

fn default_command() -> String {
    "obj2gltf".to_string()
}

fn default_args() -> Vec<String> {
    vec![
        "-i".to_string(),
        "{input}".to_string(),
        "-o".to_string(),
        "{output}".to_string(),
    ]
}

fn default_timeout() -> u64 {
    120
}

fn default_work_dir() -> String {
    "data/convert".to_string()
}

fn default_max_input() -> u64 {
    100 * 1024 * 1024
}
