use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid API base URL '{url}', expected 'http://' or 'https://'")]
    InvalidBaseUrl { url: String },

    #[error("Polling multiplier must be a finite number of at least 1.0, got {value}")]
    InvalidMultiplier { value: f64 },

    #[error("Polling max_delay ({max_ms}ms) is shorter than initial_delay ({initial_ms}ms)")]
    MaxDelayBelowInitial { initial_ms: u64, max_ms: u64 },

    #[error("Polling max_attempts must be positive")]
    NoAttempts,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_api(config)?;
    validate_polling(config)?;
    Ok(())
}

fn validate_api(config: &Config) -> Result<(), ValidationError> {
    let url = config.api.base_url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidBaseUrl {
            url: config.api.base_url.clone(),
        });
    }
    Ok(())
}

fn validate_polling(config: &Config) -> Result<(), ValidationError> {
    let polling = &config.polling;

    if !polling.multiplier.is_finite() || polling.multiplier < 1.0 {
        return Err(ValidationError::InvalidMultiplier {
            value: polling.multiplier,
        });
    }

    if polling.max_delay < polling.initial_delay {
        return Err(ValidationError::MaxDelayBelowInitial {
            initial_ms: polling.initial_delay.as_millis(),
            max_ms: polling.max_delay.as_millis(),
        });
    }

    if polling.max_attempts == 0 {
        return Err(ValidationError::NoAttempts);
    }

    Ok(())
}
