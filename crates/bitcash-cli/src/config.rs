//! CLI configuration file
//!
//! `~/.bitcash/config.toml` supplies values for variables missing from the
//! environment. Absent fields fall through to the SDK defaults.

use std::path::PathBuf;

use bitcash_sdk::env::{DEFAULT_CHAIN_ID, DEFAULT_PERMISSION, DEFAULT_RPC_ENDPOINT};
use serde::{Deserialize, Serialize};

use crate::CliError;

/// CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    /// Chain id, hex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
    /// Signing permission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".bitcash"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load the config file; defaults when there is none
    pub fn load() -> Result<Self, CliError> {
        match Self::config_path() {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
                toml::from_str(&content).map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
            }
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<PathBuf, CliError> {
        let path = Self::config_path().ok_or_else(|| CliError::Config("cannot determine config path".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Value for an environment variable this file can supply
    pub fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "RPC_ENDPOINT" => self.rpc_url.clone(),
            "CHAIN_ID" => self.chain_id.clone(),
            "PERMISSION" => self.permission.clone(),
            _ => None,
        }
    }

    /// RPC URL, falling back to the default
    pub fn effective_rpc_url(&self) -> &str {
        self.rpc_url.as_deref().unwrap_or(DEFAULT_RPC_ENDPOINT)
    }

    /// Chain id, falling back to the default
    pub fn effective_chain_id(&self) -> &str {
        self.chain_id.as_deref().unwrap_or(DEFAULT_CHAIN_ID)
    }

    /// Permission, falling back to the default
    pub fn effective_permission(&self) -> &str {
        self.permission.as_deref().unwrap_or(DEFAULT_PERMISSION)
    }
}
