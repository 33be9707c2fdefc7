use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::sync::CAPACITY;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid reconnect delay {value:?}: {source}")]
    ReconnectDelay {
        value: String,
        source: humantime::DurationError,
    },
    #[error("trail capacity must be at least 1")]
    ZeroTrailCapacity,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub trail: TrailConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Host the client runs against, with optional port.
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_local_endpoint")]
    pub local_endpoint: String,
    #[serde(default = "default_dev_hosts")]
    pub dev_hosts: Vec<String>,
    /// Skips endpoint selection entirely.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay: String,
}

fn default_host() -> String {
    "localhost:8000".to_string()
}

fn default_path() -> String {
    "/ws/positions".to_string()
}

fn default_local_endpoint() -> String {
    "ws://127.0.0.1:8000/ws/positions".to_string()
}

fn default_dev_hosts() -> Vec<String> {
    vec!["localhost".to_string(), "127.0.0.1".to_string()]
}

fn default_reconnect_delay() -> String {
    "3s".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            path: default_path(),
            local_endpoint: default_local_endpoint(),
            dev_hosts: default_dev_hosts(),
            endpoint: None,
            reconnect_delay: default_reconnect_delay(),
        }
    }
}

impl FeedConfig {
    pub fn reconnect_delay(&self) -> Result<Duration, ConfigError> {
        humantime::parse_duration(self.reconnect_delay.trim()).map_err(|source| {
            ConfigError::ReconnectDelay {
                value: self.reconnect_delay.clone(),
                source,
            }
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrailConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    CAPACITY
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.feed.reconnect_delay()?;
        if self.trail.capacity == 0 {
            return Err(ConfigError::ZeroTrailCapacity);
        }
        Ok(())
    }
}
