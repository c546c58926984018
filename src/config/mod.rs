//! Configuration loading and management
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//!   public_url: https://collab.example.com
//! resources:
//!   - name: events
//!     default_sort_by: StartsAt
//!     default_sort_dir: desc
//! ```

use crate::core::error::ConfigError;
use crate::core::sort::SortDirection;
use serde::{Deserialize, Serialize};
use url::Url;

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Public base URL for continuation links
    ///
    /// When unset, links are built from the request's own scheme and `Host`.
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            public_url: None,
        }
    }
}

impl ServerConfig {
    /// `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed `public_url`, if configured
    pub fn public_url(&self) -> Result<Option<Url>, ConfigError> {
        let Some(raw) = &self.public_url else {
            return Ok(None);
        };

        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidPublicUrl {
            url: raw.clone(),
            message: e.to_string(),
        })?;

        let http = matches!(url.scheme(), "http" | "https");
        let has_host = url.host_str().is_some_and(|host| !host.is_empty());
        if url.cannot_be_a_base() || !http || !has_host {
            return Err(ConfigError::InvalidPublicUrl {
                url: raw.clone(),
                message: "not an absolute http(s) URL".to_string(),
            });
        }

        Ok(Some(url))
    }
}

/// Per-resource overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Resource name as it appears in URLs (e.g., "venues")
    pub name: String,

    #[serde(default)]
    pub default_sort_by: Option<String>,

    #[serde(default)]
    pub default_sort_dir: Option<SortDirection>,
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

impl ListingConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.server.public_url()?;
        Ok(config)
    }

    /// Overrides for one resource
    pub fn resource(&self, name: &str) -> Option<&ResourceConfig> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Default configuration: local server, built-in resource defaults
    pub fn default_config() -> Self {
        Self::default()
    }
}
