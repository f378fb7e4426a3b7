//! Configuration management for muletrack

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Account filter configuration
    pub account: AccountConfig,

    /// Delivery endpoint configuration
    pub endpoint: EndpointConfig,

    /// Debounce gate configuration
    pub gate: GateConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from an optional TOML file layered with
    /// `MULETRACK_*` environment variables
    ///
    /// Environment variables use `__` as the section separator, e.g.
    /// `MULETRACK_ENDPOINT__URL` overrides `endpoint.url`.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("MULETRACK")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| Error::config(e.to_string()))
    }
}

/// Account filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Master on/off switch for this account/profile
    pub enabled_for_this_account: bool,

    /// Comma-separated allow-list of mule RSNs; empty = unrestricted
    pub mule_rsns: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            enabled_for_this_account: true,
            mule_rsns: String::new(),
        }
    }
}

/// Delivery endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// POST destination; emission is skipped with a warning when empty
    pub url: String,

    /// HTTP request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_seconds: 10,
        }
    }
}

/// Debounce gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Minimum absolute coin change before a follow-up update is sent
    pub change_threshold: u64,

    /// Minimum milliseconds between consecutive updates
    pub cooldown_millis: i64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            change_threshold: 1_000_000,
            cooldown_millis: 5_000,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,

    /// Log format (json or pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_surface() {
        let config = Config::default();

        assert!(config.account.enabled_for_this_account);
        assert!(config.account.mule_rsns.is_empty());
        assert!(config.endpoint.url.is_empty());
        assert_eq!(config.gate.change_threshold, 1_000_000);
        assert_eq!(config.gate.cooldown_millis, 5_000);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[endpoint]\nurl = \"https://example.com/balance\"\n\n[account]\nmule_rsns = \"Mule1, Mule2\"\n"
        )
        .unwrap();

        let config = Config::load(file.path().to_str()).unwrap();

        assert_eq!(config.endpoint.url, "https://example.com/balance");
        assert_eq!(config.account.mule_rsns, "Mule1, Mule2");
        assert_eq!(config.gate.change_threshold, 1_000_000);
        assert!(config.account.enabled_for_this_account);
    }
}
