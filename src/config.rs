use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_OVERPASS_URL: &str = "http://overpass-api.de/api/interpreter";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub overpass: OverpassConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OverpassConfig {
    /// Interpreter endpoint receiving the POST query
    pub url: String,
    /// Server-side `[timeout:N]` of the Overpass query
    pub query_timeout_secs: u64,
    /// Client-side timeout applied to every HTTP request
    pub http_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OVERPASS_URL.to_string(),
            query_timeout_secs: 25,
            http_timeout_secs: 60,
            user_agent: format!("thirsty/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl OverpassConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;
        if config.overpass.query_timeout_secs == 0 {
            anyhow::bail!("overpass.query_timeout_secs must be positive");
        }
        Ok(config)
    }
}
