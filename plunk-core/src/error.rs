//! Error types for plunk-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse tutorial record at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.plunk/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// No record file exists for the requested web path.
    #[error("tutorial record not found at {path}")]
    NotFound { path: PathBuf },

    /// The record file at the web path's key holds a different web path.
    #[error("record at {path} belongs to '{found}', not '{expected}'")]
    WebPathMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
}

/// Errors raised while reading [`SyncConfig`](crate::config::SyncConfig) from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {var}; expected: {expected}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}
