use anyhow::{anyhow, Context, Result};
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::api::EditOptions;

/// Application configuration module
/// This module handles loading, validating and saving the settings of the
/// API connection and of the edits the tool publishes.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Settings applied to every published edit
    #[serde(default)]
    pub edit: EditConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Wikibase API connection configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    // @field: Full URL of api.php
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    // @field: OAuth 2 owner-only access token (empty for anonymous edits)
    #[serde(default = "String::new")]
    pub access_token: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            access_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Edit settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EditConfig {
    /// Edit summary attached to the batched edit
    #[serde(default = "String::new")]
    pub summary: String,

    /// Replication lag, in seconds, above which the server should refuse the edit
    #[serde(default = "default_maxlag")]
    pub maxlag: u32,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            summary: String::new(),
            maxlag: default_maxlag(),
        }
    }
}

impl EditConfig {
    /// Write options for the API client
    pub fn options(&self) -> EditOptions {
        EditOptions {
            summary: self.summary.clone(),
            maxlag: self.maxlag,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_endpoint() -> String {
    "https://www.wikidata.org/w/api.php".to_string()
}

fn default_user_agent() -> String {
    format!("termbatch/{} (batched term editor)", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_maxlag() -> u32 {
    5
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api.endpoint)
            .map_err(|e| anyhow!("Invalid API endpoint '{}': {}", self.api.endpoint, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!("API endpoint must use http or https: {}", self.api.endpoint));
        }

        if self.api.user_agent.trim().is_empty() {
            return Err(anyhow!("A user agent is required"));
        }
        HeaderValue::from_str(&self.api.user_agent)
            .map_err(|_| anyhow!("User agent is not a valid HTTP header value: {:?}", self.api.user_agent))?;

        if self.api.timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be at least one second"));
        }

        Ok(())
    }

    /// Load a configuration file, or write the defaults to `path` when it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig::default(),
            edit: EditConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
