//! Runtime configuration
//!
//! Supports loading settings from (in order of priority):
//! 1. Runtime environment variables (`ONEBOX_ENV`, `ONEBOX_API_BASE`, `ONEBOX_RELAY`)
//! 2. JSON file (~/.config/onebox/onebox.json)
//! 3. Built-in defaults (development in debug builds, production in release builds)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;
use crate::tester::RelayProxy;

/// Config filename in the Onebox config directory
const CONFIG_FILE: &str = "onebox.json";

/// Default remote API base
pub const DEFAULT_API_BASE: &str = "https://hiring.reachinbox.xyz/api/v1";

/// Which data source the operations are wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Canned data only; no network I/O from domain operations
    Development,
    /// Live API with the configured fallback policy
    Production,
}

impl Environment {
    /// Development for debug builds, production for release builds
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(Error::validation(format!("Unknown environment: {}", other))),
        }
    }
}

/// What the operations do when a live call fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackPolicy {
    /// Serve the mock catalog when a list/get call fails
    pub mock_reads_on_failure: bool,
    /// Report success when a delete/reply call fails
    pub optimistic_acks: bool,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            mock_reads_on_failure: true,
            optimistic_acks: true,
        }
    }
}

impl FallbackPolicy {
    /// Surface every failure to the caller
    pub fn strict() -> Self {
        Self {
            mock_reads_on_failure: false,
            optimistic_acks: false,
        }
    }
}

/// Top-level settings for building an `Onebox`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneboxConfig {
    pub api_base: String,
    pub environment: Environment,
    pub relay: RelayProxy,
    pub fallback: FallbackPolicy,
}

impl Default for OneboxConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            environment: Environment::from_build(),
            relay: RelayProxy::default(),
            fallback: FallbackPolicy::default(),
        }
    }
}

impl OneboxConfig {
    /// Load settings: config file if present, then environment overrides
    pub fn load() -> Result<Self> {
        let base = if config::config_exists(CONFIG_FILE) {
            config::load_json(CONFIG_FILE)?
        } else {
            Self::default()
        };
        base.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Load settings from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        config::load_json_file(path)
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply overrides from a variable lookup (normally the process environment)
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("ONEBOX_ENV").filter(|v| !v.is_empty()) {
            self.environment = env.parse()?;
        }
        if let Some(base) = lookup("ONEBOX_API_BASE").filter(|v| !v.is_empty()) {
            self.api_base = base;
        }
        if let Some(relay) = lookup("ONEBOX_RELAY").filter(|v| !v.is_empty()) {
            self.relay = relay.parse()?;
        }
        Ok(self)
    }

    /// Persist these settings to the config directory
    pub fn save(&self) -> Result<()> {
        config::save_json(CONFIG_FILE, self)
    }

    /// Get the default config file path (~/.config/onebox/onebox.json)
    pub fn default_config_path() -> Option<PathBuf> {
        config::config_path(CONFIG_FILE)
    }
}
