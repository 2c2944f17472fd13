use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "CHANNELSCOUT_CONFIG";
const API_URL_ENV_VAR: &str = "CHANNELSCOUT_API_URL";
const DEFAULT_CONFIG_PATH: &str = "config/channelscout.toml";
const ENV_PREFIX: &str = "CHANNELSCOUT";
const ENV_SEPARATOR: &str = "__";

/// Path of the configuration file: `CHANNELSCOUT_CONFIG` or the default location
pub fn default_path() -> PathBuf {
    env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables
/// 5. `CHANNELSCOUT_API_URL` shortcut (highest priority)
pub fn load(config_path: PathBuf) -> Result<Config, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    let mut config = load_from_sources(config_path)?;

    apply_shortcuts(&mut config);

    Ok(config)
}

/// Apply single-variable overrides that don't follow the `CHANNELSCOUT__` layout
fn apply_shortcuts(config: &mut Config) {
    if let Ok(base_url) = env::var(API_URL_ENV_VAR) {
        if !base_url.is_empty() {
            config.api.base_url = base_url;
        }
    }
}

/// Load configuration from a specific path and environment
/// Useful for testing with custom config files
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // CHANNELSCOUT__API__BASE_URL -> api.base_url
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}
