//! Service configuration.
//!
//! Loaded from a TOML file. `${VAR}` and `${VAR:-default}` references are replaced
//! with environment values before parsing, so secrets can stay out of the file.
//! Every section has defaults; an empty file starts the demo setup: in-memory stock,
//! the built-in menu, no webhook secret.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [stock]
//! mode = "remote"
//! base_url = "http://inventory:8001"
//! timeout_ms = 5000
//!
//! [kitchen]
//! webhook_secret = "${KITCHEN_WEBHOOK_SECRET}"
//! notify_url = "http://kitchen:8002"
//! ```

use crate::kitchen::DEFAULT_SIGNATURE_HEADER;
use crate::menu::demo_items;
use crate::model::{demo_levels, MenuItem, StockLevels};
use axum::http::HeaderName;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.message().to_string())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub stock: StockConfig,
    #[serde(default)]
    pub kitchen: KitchenConfig,
    /// Dishes on offer. Replaces the built-in menu when present.
    #[serde(default = "demo_items")]
    pub menu: Vec<MenuItem>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            stock: StockConfig::default(),
            kitchen: KitchenConfig::default(),
            menu: demo_items(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Where ingredient stock lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StockMode {
    /// An inventory actor inside this process, also served under `/stock`.
    #[default]
    Memory,
    /// An inventory service reached at `base_url`.
    Remote,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StockConfig {
    #[serde(default)]
    pub mode: StockMode,
    /// Required in remote mode.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Bound on each reserve/release call.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Opening levels for the in-memory inventory.
    #[serde(default = "demo_levels")]
    pub inventory: StockLevels,
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            mode: StockMode::default(),
            base_url: None,
            timeout_ms: default_timeout_ms(),
            inventory: demo_levels(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KitchenConfig {
    /// Shared HMAC secret. Unset or empty leaves the webhook unauthenticated.
    #[serde(default)]
    pub webhook_secret: Option<String>,
    #[serde(default = "default_signature_header")]
    pub signature_header: String,
    /// Kitchen endpoint for new tickets. Tickets are only logged when unset.
    #[serde(default)]
    pub notify_url: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_signature_header() -> String {
    DEFAULT_SIGNATURE_HEADER.to_string()
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            webhook_secret: None,
            signature_header: default_signature_header(),
            notify_url: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl KitchenConfig {
    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl StockConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Replaces `${VAR}` and `${VAR:-default}` with values from the environment.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
        .map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

    let mut result = String::with_capacity(input.len());
    let mut last = 0;
    for cap in re.captures_iter(input) {
        let (Some(whole), Some(name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        let value = match (std::env::var(name.as_str()), cap.get(2)) {
            (Ok(value), _) => value,
            (Err(_), Some(default)) => default.as_str().to_string(),
            (Err(_), None) => {
                return Err(ConfigError::Validation(format!(
                    "Environment variable '{}' not found",
                    name.as_str()
                )))
            }
        };
        result.push_str(&input[last..whole.start()]);
        result.push_str(&value);
        last = whole.end();
    }
    result.push_str(&input[last..]);
    Ok(result)
}

impl Config {
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        content.parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stock.mode == StockMode::Remote
            && self.stock.base_url.as_deref().map_or(true, str::is_empty)
        {
            return Err(ConfigError::Validation(
                "stock.base_url is required when stock.mode = \"remote\"".into(),
            ));
        }
        if self.stock.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "stock.timeout_ms must be greater than 0".into(),
            ));
        }
        if self.kitchen.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "kitchen.timeout_ms must be greater than 0".into(),
            ));
        }
        HeaderName::from_str(&self.kitchen.signature_header).map_err(|_| {
            ConfigError::Validation(format!(
                "kitchen.signature_header '{}' is not a valid header name",
                self.kitchen.signature_header
            ))
        })?;

        let mut seen = HashSet::new();
        for item in &self.menu {
            if item.id.trim().is_empty() {
                return Err(ConfigError::Validation("menu item id cannot be empty".into()));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate menu item '{}'",
                    item.id
                )));
            }
        }
        Ok(())
    }

    pub fn signature_header(&self) -> Result<HeaderName, ConfigError> {
        HeaderName::from_str(&self.kitchen.signature_header)
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let resolved = resolve_env_vars(s)?;
        let config: Config = toml::from_str(&resolved)?;
        config.validate()?;
        Ok(config)
    }
}
