//! TOML configuration.
//!
//! Every section is optional. A missing config file falls back to
//! [`Config::minimal`], which serves the embedded dataset on the default
//! bind address.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7341".to_string()
}

/// Where the knowledge base comes from.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DataConfig {
    /// JSON dataset replacing the embedded one.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    50
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AssistantConfig {
    /// Pause before the assistant answers over HTTP, in milliseconds.
    #[serde(default)]
    pub reply_delay_ms: u64,
}

const MAX_REPLY_DELAY_MS: u64 = 10_000;

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        if self.server.bind.trim().is_empty() {
            anyhow::bail!("server.bind must not be empty");
        }

        if self.search.max_results < 1 {
            anyhow::bail!("search.max_results must be >= 1");
        }

        if self.assistant.reply_delay_ms > MAX_REPLY_DELAY_MS {
            anyhow::bail!(
                "assistant.reply_delay_ms must be <= {}",
                MAX_REPLY_DELAY_MS
            );
        }

        Ok(())
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

/// Loads `path` if it exists, otherwise returns [`Config::minimal`].
pub fn load_config_or_minimal(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::minimal())
    }
}
