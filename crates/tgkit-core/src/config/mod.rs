mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::TgError;
use defaults::*;

/// Top-level tgkit configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Bot credentials and endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot token issued by BotFather. Usually supplied via `TELEGRAM_BOT_TOKEN`.
    #[serde(default)]
    pub token: String,
    /// Base URL of the Bot API server (override for a self-hosted server).
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: default_api_url(),
        }
    }
}

/// Long-poll update loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Maximum number of updates requested per `getUpdates` call.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Long-poll timeout while connected.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Long-poll timeout for the first request after a lost connection.
    #[serde(default = "default_recovery_timeout_secs")]
    pub recovery_timeout_secs: u64,
    /// Pause after a failed poll before retrying. 0 = retry immediately.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Update kinds to receive. Empty = server default.
    #[serde(default)]
    pub allowed_updates: Vec<String>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            timeout_secs: default_timeout_secs(),
            recovery_timeout_secs: default_recovery_timeout_secs(),
            retry_delay_ms: default_retry_delay_ms(),
            allowed_updates: Vec::new(),
        }
    }
}

impl PollingConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Logging config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file. Stdout only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, TgError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| TgError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| TgError::Config(format!("failed to parse config: {}", e)))?;

    if config.polling.limit == 0 || config.polling.limit > 100 {
        return Err(TgError::Config(format!(
            "polling.limit must be between 1 and 100, got {}",
            config.polling.limit
        )));
    }

    Ok(config)
}
