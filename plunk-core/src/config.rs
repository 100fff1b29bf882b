//! Sync configuration.
//!
//! Everything the syncer needs from its environment is carried in
//! [`SyncConfig`] and passed in explicitly. [`SyncConfig::from_env`] is the
//! only place that reads process environment variables.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const ENV_ENABLED: &str = "PLNKR_ENABLED";
pub const ENV_API_BASE: &str = "PLNKR_API_BASE";
pub const ENV_EDITOR_BASE: &str = "PLNKR_EDITOR_BASE";
pub const ENV_STRATEGY: &str = "PLNKR_STRATEGY";
pub const ENV_SESSION: &str = "PLNKR_SESSION";

pub const DEFAULT_API_BASE: &str = "http://api.plnkr.co";
pub const DEFAULT_EDITOR_BASE: &str = "https://plnkr.co";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How a record with pending changes is pushed to the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PushStrategy {
    /// Always create a new plunk from the full file list and replace the id.
    #[default]
    Recreate,
    /// Send only the change set to the existing plunk when one exists.
    Incremental,
}

impl FromStr for PushStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recreate" => Ok(Self::Recreate),
            "incremental" => Ok(Self::Incremental),
            _ => Err(ConfigError::InvalidValue {
                var: ENV_STRATEGY,
                value: s.to_string(),
                expected: "recreate, incremental",
            }),
        }
    }
}

impl fmt::Display for PushStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushStrategy::Recreate => write!(f, "recreate"),
            PushStrategy::Incremental => write!(f, "incremental"),
        }
    }
}

/// Settings for talking to the plunk service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// When `false`, no request leaves the process and stub ids are handed out.
    pub remote_calls_enabled: bool,
    /// Base URL of the JSON API (`<api_base>/plunks/...`).
    pub api_base: String,
    /// Base URL of the browser editor used for share links.
    pub editor_base: String,
    pub strategy: PushStrategy,
    pub timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            remote_calls_enabled: false,
            api_base: DEFAULT_API_BASE.to_string(),
            editor_base: DEFAULT_EDITOR_BASE.to_string(),
            strategy: PushStrategy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SyncConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// `PLNKR_ENABLED` set to any non-empty value enables remote calls.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let strategy = match non_empty(ENV_STRATEGY) {
            Some(raw) => raw.parse()?,
            None => PushStrategy::default(),
        };

        Ok(Self {
            remote_calls_enabled: non_empty(ENV_ENABLED).is_some(),
            api_base: non_empty(ENV_API_BASE)
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            editor_base: non_empty(ENV_EDITOR_BASE)
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_EDITOR_BASE.to_string()),
            strategy,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Config with remote calls enabled against `api_base`; used by tests and
    /// embedders that do not read the environment.
    pub fn enabled(api_base: impl Into<String>) -> Self {
        Self {
            remote_calls_enabled: true,
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: PushStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
