//! Configuration module for the wallet header.
//!
//! This module handles parsing configuration from environment variables.
//! Command-line flags applied afterwards take precedence.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `WALLET_HEADER_STATE_PATH` | No | `~/.wallet-header/state.json` | JSON wallet state file |
//! | `WALLET_HEADER_NETWORK` | No | (state file) | `mainnet` or `testnet`, overrides the state file |
//! | `WALLET_HEADER_LOG_PATH` | No | `~/.wallet-header/header.log` | Log file used while the TUI is running |
//! | `WALLET_HEADER_TICK_MS` | No | 60 | TUI tick rate in milliseconds (10-1000) |
//!
//! # Example
//!
//! ```no_run
//! use wallet_header::config::Config;
//!
//! let config = Config::from_env().expect("Failed to load configuration");
//! println!("State file: {}", config.state_path.display());
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use directories::BaseDirs;
use thiserror::Error;

use crate::types::NetworkMode;

/// Default data directory name relative to home.
const DEFAULT_DATA_DIR: &str = ".wallet-header";

/// Default state file name inside the data directory.
const DEFAULT_STATE_FILE: &str = "state.json";

/// Default log file name inside the data directory.
const DEFAULT_LOG_FILE: &str = "header.log";

/// Default TUI tick rate in milliseconds.
const DEFAULT_TICK_MS: u64 = 60;

/// Minimum allowed tick rate.
const MIN_TICK_MS: u64 = 10;

/// Maximum allowed tick rate.
const MAX_TICK_MS: u64 = 1000;

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to determine home directory.
    #[error("failed to determine home directory")]
    NoHomeDirectory,
}

/// Configuration for the wallet header.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON wallet state file.
    pub state_path: PathBuf,

    /// Network override. `None` uses the mode stored in the state file.
    pub network: Option<NetworkMode>,

    /// Log file used while the terminal is owned by the TUI.
    pub log_path: PathBuf,

    /// Interval between TUI ticks.
    pub tick_rate: Duration,
}

impl Config {
    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `WALLET_HEADER_NETWORK` is neither `mainnet` nor `testnet`
    /// - `WALLET_HEADER_TICK_MS` is not an integer between 10 and 1000
    /// - The home directory cannot be determined (needed for default paths)
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
        let data_dir = base_dirs.home_dir().join(DEFAULT_DATA_DIR);

        let state_path = env::var("WALLET_HEADER_STATE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join(DEFAULT_STATE_FILE));

        let log_path = env::var("WALLET_HEADER_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join(DEFAULT_LOG_FILE));

        let network = match env::var("WALLET_HEADER_NETWORK") {
            Ok(val) => Some(parse_network(&val)?),
            Err(_) => None,
        };

        let tick_ms = match env::var("WALLET_HEADER_TICK_MS") {
            Ok(val) => {
                let ms = val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "WALLET_HEADER_TICK_MS".to_string(),
                    message: format!("expected integer {MIN_TICK_MS}-{MAX_TICK_MS}, got '{val}'"),
                })?;
                if !(MIN_TICK_MS..=MAX_TICK_MS).contains(&ms) {
                    return Err(ConfigError::InvalidValue {
                        key: "WALLET_HEADER_TICK_MS".to_string(),
                        message: format!(
                            "tick rate must be between {MIN_TICK_MS} and {MAX_TICK_MS}, got {ms}"
                        ),
                    });
                }
                ms
            }
            Err(_) => DEFAULT_TICK_MS,
        };

        Ok(Self {
            state_path,
            network,
            log_path,
            tick_rate: Duration::from_millis(tick_ms),
        })
    }

    /// Overrides the state file path.
    #[must_use]
    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = path.into();
        self
    }

    /// Overrides the network mode.
    #[must_use]
    pub fn with_network(mut self, network: NetworkMode) -> Self {
        self.network = Some(network);
        self
    }
}

fn parse_network(val: &str) -> Result<NetworkMode, ConfigError> {
    match val.trim().to_ascii_lowercase().as_str() {
        "mainnet" => Ok(NetworkMode::Mainnet),
        "testnet" => Ok(NetworkMode::Testnet),
        _ => Err(ConfigError::InvalidValue {
            key: "WALLET_HEADER_NETWORK".to_string(),
            message: format!("expected 'mainnet' or 'testnet', got '{val}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Helper to run tests with isolated environment variables.
    /// Clears all WALLET_HEADER_* vars before the test and restores them after.
    fn with_clean_env<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let saved_vars: Vec<(String, String)> = env::vars()
            .filter(|(k, _)| k.starts_with("WALLET_HEADER_"))
            .collect();

        for (key, _) in &saved_vars {
            env::remove_var(key);
        }

        let result = f();

        for (key, _) in env::vars().filter(|(k, _)| k.starts_with("WALLET_HEADER_")) {
            env::remove_var(key);
        }
        for (key, value) in saved_vars {
            env::set_var(key, value);
        }

        result
    }

    #[test]
    #[serial]
    fn test_default_config() {
        with_clean_env(|| {
            let config = Config::from_env().expect("should parse default config");

            assert!(config.state_path.ends_with(DEFAULT_STATE_FILE));
            assert!(config.log_path.ends_with(DEFAULT_LOG_FILE));
            assert!(config
                .state_path
                .parent()
                .is_some_and(|dir| dir.ends_with(DEFAULT_DATA_DIR)));
            assert!(config.network.is_none());
            assert_eq!(config.tick_rate, Duration::from_millis(DEFAULT_TICK_MS));
        });
    }

    #[test]
    #[serial]
    fn test_full_config() {
        with_clean_env(|| {
            env::set_var("WALLET_HEADER_STATE_PATH", "/custom/state.json");
            env::set_var("WALLET_HEADER_LOG_PATH", "/custom/header.log");
            env::set_var("WALLET_HEADER_NETWORK", "Testnet");
            env::set_var("WALLET_HEADER_TICK_MS", "250");

            let config = Config::from_env().expect("should parse full config");

            assert_eq!(config.state_path, PathBuf::from("/custom/state.json"));
            assert_eq!(config.log_path, PathBuf::from("/custom/header.log"));
            assert_eq!(config.network, Some(NetworkMode::Testnet));
            assert_eq!(config.tick_rate, Duration::from_millis(250));
        });
    }

    #[test]
    #[serial]
    fn test_invalid_network_rejected() {
        with_clean_env(|| {
            env::set_var("WALLET_HEADER_NETWORK", "devnet");

            let err = Config::from_env().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue { ref key, ref message }
                    if key == "WALLET_HEADER_NETWORK" && message.contains("devnet")
            ));
        });
    }

    #[test]
    #[serial]
    fn test_invalid_tick_rate() {
        with_clean_env(|| {
            env::set_var("WALLET_HEADER_TICK_MS", "fast");

            let err = Config::from_env().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue { ref key, .. } if key == "WALLET_HEADER_TICK_MS"
            ));
        });
    }

    #[test]
    #[serial]
    fn test_tick_rate_bounds() {
        with_clean_env(|| {
            for val in ["9", "1001"] {
                env::set_var("WALLET_HEADER_TICK_MS", val);
                let err = Config::from_env().unwrap_err();
                assert!(matches!(
                    err,
                    ConfigError::InvalidValue { ref message, .. }
                        if message.contains("between 10 and 1000")
                ));
            }

            env::set_var("WALLET_HEADER_TICK_MS", "10");
            assert_eq!(
                Config::from_env().unwrap().tick_rate,
                Duration::from_millis(10)
            );
        });
    }

    #[test]
    #[serial]
    fn test_overrides_take_precedence() {
        with_clean_env(|| {
            env::set_var("WALLET_HEADER_NETWORK", "mainnet");

            let config = Config::from_env()
                .unwrap()
                .with_network(NetworkMode::Testnet)
                .with_state_path("/tmp/other.json");

            assert_eq!(config.network, Some(NetworkMode::Testnet));
            assert_eq!(config.state_path, PathBuf::from("/tmp/other.json"));
        });
    }
}
