// Runtime configuration as seen by the pipeline

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitelistBackend {
    Json,
    Database,
}

impl FromStr for WhitelistBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(WhitelistBackend::Json),
            "database" | "db" => Ok(WhitelistBackend::Database),
            other => Err(anyhow::anyhow!(
                "unknown whitelist type '{}', expected 'json' or 'database'",
                other
            )),
        }
    }
}

impl fmt::Display for WhitelistBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WhitelistBackend::Json => write!(f, "json"),
            WhitelistBackend::Database => write!(f, "database"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RconConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
}

impl Default for RconConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 19999,
            password: String::new(),
        }
    }
}

impl RconConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub whitelist_backend: WhitelistBackend,
    pub whitelist_path: String,
    pub base_log_dir: String,
    pub rcon: RconConfig,
    pub heartbeat_seconds: u64,
}
