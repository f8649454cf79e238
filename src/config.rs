//! Configuration for Aries Bridge

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Agent admin API settings
    #[serde(default)]
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Base URL of the agent admin API
    #[serde(default = "default_admin_url")]
    pub admin_url: String,

    /// Admin API key, sent as `X-API-Key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Tag used for credential definitions created without one
    #[serde(default = "default_tag")]
    pub default_tag: String,

    /// Whether new credential definitions support revocation
    #[serde(default)]
    pub support_revocation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            agent: AgentConfig::default(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            admin_url: default_admin_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            default_tag: default_tag(),
            support_revocation: false,
        }
    }
}

impl Config {
    /// Load config from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a specific file, then apply environment overrides.
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `ARIES_*` overrides from the given lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ARIES_ADMIN_URL") {
            self.agent.admin_url = url;
        }
        if let Some(key) = lookup("ARIES_API_KEY") {
            self.agent.api_key = Some(key).filter(|k| !k.is_empty());
        }
        if let Some(port) = lookup("ARIES_HTTP_PORT") {
            self.http_port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid ARIES_HTTP_PORT: {}", port)))?;
        }
        Ok(())
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        let url = &self.agent.admin_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "agent.admin_url must be an http(s) URL, got {:?}",
                url
            )));
        }
        Ok(())
    }

    /// Save config to a file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the default config path
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not find config directory".into()))?;
        Ok(dir.join("aries-bridge").join("config.toml"))
    }
}

// Default value functions

fn default_http_port() -> u16 {
    3000
}

fn default_admin_url() -> String {
    "http://localhost:8031".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_tag() -> String {
    "default".to_string()
}
