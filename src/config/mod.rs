//! Configuration loading and management

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime environment; decides how much fault detail reaches clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Where previous/next page links of a collection are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPlacement {
    /// In the `links` array of the response body
    #[default]
    Body,
    /// In the `X-Pagination` header
    Header,
}

/// Listener address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Paging limits for collection endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub link_placement: LinkPlacement,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 20,
            link_placement: LinkPlacement::Body,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,

    /// Absolute base used for every generated link (e.g. `http://localhost:5000`)
    pub base_url: String,

    pub environment: Environment,

    pub pagination: PaginationConfig,

    /// Populate the repository with sample data at startup
    pub seed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            base_url: "http://localhost:5000".to_string(),
            environment: Environment::Development,
            pagination: PaginationConfig::default(),
            seed: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the request pipeline cannot honour
    pub fn validate(&self) -> Result<()> {
        let pagination = &self.pagination;
        if pagination.max_page_size == 0 {
            bail!("pagination.max_page_size must be at least 1");
        }
        if pagination.default_page_size == 0 || pagination.default_page_size > pagination.max_page_size {
            bail!(
                "pagination.default_page_size must be between 1 and {} (got {})",
                pagination.max_page_size,
                pagination.default_page_size
            );
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            bail!("base_url must be an absolute http(s) URL (got '{}')", self.base_url);
        }
        Ok(())
    }
}
