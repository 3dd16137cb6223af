use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use warden_domain::{RconConfig, RuntimeConfig, WhitelistBackend};

pub const CONFIG_ENV: &str = "WARDEN_CONFIG";

/// File-level configuration. Precedence: defaults < config file < process
/// environment < command-line overrides.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub whitelist_type: String,
    pub whitelist_path: String,
    pub base_log_dir: String,
    pub rcon_host: String,
    pub rcon_port: u16,
    pub rcon_password: String,
    pub heartbeat_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            whitelist_type: "json".to_string(),
            whitelist_path: "./whitelist.json".to_string(),
            base_log_dir: "./profile".to_string(),
            rcon_host: "127.0.0.1".to_string(),
            rcon_port: 19999,
            rcon_password: String::new(),
            heartbeat_seconds: 15,
        }
    }
}

/// Command-line overrides, applied last.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub whitelist_type: Option<String>,
    pub whitelist_path: Option<String>,
    pub base_log_dir: Option<String>,
    pub rcon_host: Option<String>,
    pub rcon_port: Option<u16>,
    pub rcon_password: Option<String>,
    pub heartbeat_seconds: Option<u64>,
}

impl AppConfig {
    /// Reads the config file named by `WARDEN_CONFIG` (default
    /// `./config.toml`), falling back to defaults when it does not exist,
    /// then applies environment overrides. Call `validate` after any
    /// command-line overrides have been applied.
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        if !file_path.exists() {
            warn!("{} not found, using defaults", path);
            let mut config = AppConfig::default();
            config.apply_env_overrides()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = env::var("WARDEN_WHITELIST_TYPE") {
            self.whitelist_type = value;
        }
        if let Ok(value) = env::var("WARDEN_WHITELIST_PATH") {
            self.whitelist_path = value;
        }
        if let Ok(value) = env::var("WARDEN_BASE_LOG_DIR") {
            self.base_log_dir = value;
        }
        if let Ok(value) = env::var("WARDEN_RCON_HOST") {
            self.rcon_host = value;
        }
        if let Ok(value) = env::var("WARDEN_RCON_PORT") {
            self.rcon_port = value
                .parse()
                .map_err(|_| anyhow!("WARDEN_RCON_PORT must be a port number, got '{}'", value))?;
        }
        if let Ok(value) = env::var("WARDEN_RCON_PASSWORD") {
            self.rcon_password = value;
        }
        if let Ok(value) = env::var("WARDEN_HEARTBEAT_SECONDS") {
            self.heartbeat_seconds = value.parse().map_err(|_| {
                anyhow!("WARDEN_HEARTBEAT_SECONDS must be an integer, got '{}'", value)
            })?;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(value) = &overrides.whitelist_type {
            self.whitelist_type = value.clone();
        }
        if let Some(value) = &overrides.whitelist_path {
            self.whitelist_path = value.clone();
        }
        if let Some(value) = &overrides.base_log_dir {
            self.base_log_dir = value.clone();
        }
        if let Some(value) = &overrides.rcon_host {
            self.rcon_host = value.clone();
        }
        if let Some(value) = overrides.rcon_port {
            self.rcon_port = value;
        }
        if let Some(value) = &overrides.rcon_password {
            self.rcon_password = value.clone();
        }
        if let Some(value) = overrides.heartbeat_seconds {
            self.heartbeat_seconds = value;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.whitelist_type.parse::<WhitelistBackend>()?;
        if self.whitelist_path.trim().is_empty() {
            return Err(anyhow!("whitelist_path must not be empty"));
        }
        if self.base_log_dir.trim().is_empty() {
            return Err(anyhow!("base_log_dir must not be empty"));
        }
        if self.rcon_host.trim().is_empty() {
            return Err(anyhow!("rcon_host must not be empty"));
        }
        if self.rcon_port == 0 {
            return Err(anyhow!("rcon_port must not be 0"));
        }
        if self.heartbeat_seconds == 0 {
            return Err(anyhow!("heartbeat_seconds must be at least 1"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> Result<RuntimeConfig> {
        Ok(RuntimeConfig {
            whitelist_backend: self.whitelist_type.parse()?,
            whitelist_path: self.whitelist_path.clone(),
            base_log_dir: self.base_log_dir.clone(),
            rcon: RconConfig {
                host: self.rcon_host.clone(),
                port: self.rcon_port,
                password: self.rcon_password.clone(),
            },
            heartbeat_seconds: self.heartbeat_seconds,
        })
    }
}
