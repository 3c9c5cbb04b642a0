use std::path::PathBuf;

use thiserror::Error;

/// The main error type for tidy operations
#[derive(Debug, Error)]
pub enum TidyError {
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read manifest {}: {source}", .path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Dependency group '{group}' not found in {}", .manifest.display())]
    GroupNotFound { group: String, manifest: PathBuf },

    #[error("Invalid extra arguments '{0}': unbalanced quotes or trailing escape")]
    ArgumentSyntax(String),

    #[error("Unknown task '{0}'")]
    UnknownTask(String),

    #[error("Environment setup failed: {0}")]
    EnvironmentSetup(String),

    #[error("Failed to execute '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{program}' failed with exit code {}", .code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string()))]
    ToolFailed { program: String, code: Option<i32> },
}

impl TidyError {
    /// Process exit code for this error. A failing tool's own status is passed
    /// through unchanged; every other failure maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            TidyError::ToolFailed {
                code: Some(code), ..
            } => *code,
            _ => 1,
        }
    }
}

/// Result type alias for tidy operations
pub type TidyResult<T> = Result<T, TidyError>;
