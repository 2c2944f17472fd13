use crate::humanize::HumanDuration;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Scraping API endpoint and transport settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: HumanDuration,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: HumanDuration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_connect_timeout() -> HumanDuration {
    HumanDuration::from_secs(10)
}

fn default_request_timeout() -> HumanDuration {
    HumanDuration::from_secs(60)
}

fn default_user_agent() -> String {
    format!("channelscout/{}", env!("CARGO_PKG_VERSION"))
}

/// Status polling schedule
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollingConfig {
    /// Wait after the first status round
    #[serde(default = "default_initial_delay")]
    pub initial_delay: HumanDuration,
    /// Growth factor applied to the previous wait
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Ceiling for the grown wait (jitter excluded)
    #[serde(default = "default_max_delay")]
    pub max_delay: HumanDuration,
    /// Upper bound (exclusive) of the random jitter added to every wait
    #[serde(default = "default_max_jitter")]
    pub max_jitter: HumanDuration,
    /// Number of status rounds before the run times out
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            initial_delay: default_initial_delay(),
            multiplier: default_multiplier(),
            max_delay: default_max_delay(),
            max_jitter: default_max_jitter(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_initial_delay() -> HumanDuration {
    HumanDuration::from_secs(1)
}

fn default_multiplier() -> f64 {
    1.5
}

fn default_max_delay() -> HumanDuration {
    HumanDuration::from_secs(10)
}

fn default_max_jitter() -> HumanDuration {
    HumanDuration::from_secs(1)
}

fn default_max_attempts() -> u32 {
    30
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}
