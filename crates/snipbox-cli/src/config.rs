//! CLI configuration file

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use snipbox_core::{validate_namespace, DEFAULT_NAMESPACE};

use crate::output::OutputFormat;

/// Overrides the config file location
pub const CONFIG_ENV: &str = "SNIPBOX_CONFIG";

/// Address `serve` binds when nothing else is configured
pub const DEFAULT_ADDR: &str = "127.0.0.1:8087";

/// Get default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snipbox")
}

/// Location of the TOML config file
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snipbox")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub namespace: String,
    pub addr: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            addr: DEFAULT_ADDR.to_string(),
            format: "table".to_string(),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it is missing or unreadable
    pub fn load() -> Self {
        let path = config_file_path();
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Wrote config to {}", path.display());
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["data_dir", "namespace", "addr", "format"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_dir" => Some(self.data_dir.display().to_string()),
            "namespace" => Some(self.namespace.clone()),
            "addr" => Some(self.addr.clone()),
            "format" => Some(self.format.clone()),
            _ => None,
        }
    }

    /// Set a key after validating the value
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "data_dir" => self.data_dir = PathBuf::from(value),
            "namespace" => {
                validate_namespace(value)?;
                self.namespace = value.to_string();
            }
            "addr" => {
                value
                    .parse::<SocketAddr>()
                    .map_err(|e| anyhow::anyhow!("Invalid address '{}': {}", value, e))?;
                self.addr = value.to_string();
            }
            "format" => {
                let format: OutputFormat = value.parse()?;
                self.format = format.to_string();
            }
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}
