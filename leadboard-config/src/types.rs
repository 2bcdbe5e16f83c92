//! Typed configuration

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Board directory when none is configured
pub const DEFAULT_DATA_DIR: &str = ".leadboard";

/// Top-level leadboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadboardConfig {
    /// Directory holding `board.yaml` and the activity log
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub retry: RetrySettings,
    /// Insert the sample leads on `init`
    #[serde(default = "default_true")]
    pub seed: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_true() -> bool {
    true
}

impl Default for LeadboardConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store: StoreConfig::default(),
            retry: RetrySettings::default(),
            seed: true,
        }
    }
}

impl LeadboardConfig {
    /// Directory of the file store: its configured path or `{data_dir}/leads`
    pub fn leads_dir(&self) -> PathBuf {
        match &self.store {
            StoreConfig::File { path: Some(path) } => path.clone(),
            _ => self.data_dir.join("leads"),
        }
    }

    /// Reject settings that parse but cannot work
    pub fn validate(&self) -> ConfigResult<()> {
        if let StoreConfig::Rest {
            url, timeout_secs, ..
        } = &self.store
        {
            if url.trim().is_empty() {
                return Err(ConfigError::invalid_value("store.url", "must not be empty"));
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::invalid_value(
                    "store.url",
                    format!("'{}' is not an http(s) URL", url),
                ));
            }
            if *timeout_secs == 0 {
                return Err(ConfigError::invalid_value(
                    "store.timeout_secs",
                    "must be at least 1",
                ));
            }
        }
        self.retry.validate()
    }
}

/// Where leads are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Process memory; gone on exit
    Memory,
    /// One YAML file per lead
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
    },
    /// PostgREST-style HTTP table
    Rest {
        url: String,
        #[serde(default)]
        api_key: String,
        #[serde(default = "default_table")]
        table: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

fn default_table() -> String {
    "leads".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl StoreConfig {
    /// Short name of the backend, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File { .. } => "file",
            Self::Rest { .. } => "rest",
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::File { path: None }
    }
}

/// Retry behavior for store calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub backoff_multiplier: f64,
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 500,
            backoff_multiplier: 2.0,
            max_delay_ms: 10_000,
        }
    }
}

impl RetrySettings {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.backoff_multiplier.is_nan() || self.backoff_multiplier < 1.0 {
            return Err(ConfigError::invalid_value(
                "retry.backoff_multiplier",
                format!("{} is below 1.0", self.backoff_multiplier),
            ));
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(ConfigError::invalid_value(
                "retry.initial_delay_ms",
                "exceeds retry.max_delay_ms",
            ));
        }
        Ok(())
    }
}
