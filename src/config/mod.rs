//! Configuration management for channelscout
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use channelscout::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Scraping API at: {}", config.api.base_url);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `CHANNELSCOUT__<section>__<key>`
//!
//! Examples:
//! - `CHANNELSCOUT__API__BASE_URL=http://scraper:8000`
//! - `CHANNELSCOUT__POLLING__MAX_ATTEMPTS=60`
//! - `CHANNELSCOUT__POLLING__MAX_DELAY=20s`
//!
//! `CHANNELSCOUT_API_URL` is accepted as a shortcut for the base URL.
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/channelscout.toml`.
//! This can be overridden using the `CHANNELSCOUT_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{ApiConfig, Config, PollingConfig, TelemetryConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_file(sources::default_path())
    }

    /// Load configuration using an explicit file instead of the default location,
    /// still applying `.env` and environment overrides
    pub fn load_with_file(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
