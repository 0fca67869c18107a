//! Application configuration loaded from environment variables.

use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

/// Default seconds between list re-fetches.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Default milliseconds to wait after start-up before the first layout
/// guard check (the hydration window in which storage may not yet be
/// readable).
const DEFAULT_HYDRATION_DELAY_MS: u64 = 300;

/// Default seconds before an HTTP request is abandoned.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors from loading configuration out of the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{0} must be a valid integer: {1}")]
    Invalid(&'static str, ParseIntError),
}

/// Configuration for the stockdeck client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the backend, e.g. `http://localhost:8080`.
    pub api_base_url: String,
    /// Directory holding the durable state and cookie files.
    pub state_dir: PathBuf,
    /// Interval between background list re-fetches.
    pub poll_interval: Duration,
    /// Delay before the first layout guard check.
    pub hydration_delay: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Required | Default       |
    /// |------------------------|----------|---------------|
    /// | `API_BASE_URL`         | **yes**  | --            |
    /// | `STATE_DIR`            | no       | `.stockdeck`  |
    /// | `POLL_INTERVAL_SECS`   | no       | `10`          |
    /// | `HYDRATION_DELAY_MS`   | no       | `300`         |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `30`          |
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url =
            std::env::var("API_BASE_URL").map_err(|_| ConfigError::Missing("API_BASE_URL"))?;

        let state_dir: PathBuf = std::env::var("STATE_DIR")
            .unwrap_or_else(|_| ".stockdeck".into())
            .into();

        let poll_interval_secs = env_u64("POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;
        let hydration_delay_ms = env_u64("HYDRATION_DELAY_MS", DEFAULT_HYDRATION_DELAY_MS)?;
        let request_timeout_secs = env_u64("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        Ok(Self {
            api_base_url,
            state_dir,
            poll_interval: Duration::from_secs(poll_interval_secs),
            hydration_delay: Duration::from_millis(hydration_delay_ms),
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

/// Read an optional numeric variable, falling back to `default` when
/// unset. An unparseable value is an error rather than a silent default.
fn env_u64(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw.parse().map_err(|e| ConfigError::Invalid(name, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment access is process-global, so every case runs inside
    // one test to avoid races with parallel test threads.
    #[test]
    fn from_env_reports_missing_and_invalid_variables() {
        std::env::remove_var("API_BASE_URL");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::Missing("API_BASE_URL"))
        ));

        std::env::set_var("API_BASE_URL", "http://localhost:8080");
        std::env::set_var("POLL_INTERVAL_SECS", "not-a-number");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::Invalid("POLL_INTERVAL_SECS", _))
        ));

        std::env::set_var("POLL_INTERVAL_SECS", "5");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.hydration_delay, Duration::from_millis(300));
        assert_eq!(config.state_dir, PathBuf::from(".stockdeck"));

        std::env::remove_var("API_BASE_URL");
        std::env::remove_var("POLL_INTERVAL_SECS");
    }
}
