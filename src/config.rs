use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::api::DEFAULT_BASE_URL;

const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 2000;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the live client data API
    pub live_client_url: String,

    /// Delay between poll cycles
    pub poll_interval: Duration,

    /// Per-request timeout against the live client
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            live_client_url: env::var("LIVE_CLIENT_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),

            poll_interval: millis_var("POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?,

            request_timeout: millis_var("REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            live_client_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

fn millis_var(name: &str, default: u64) -> Result<Duration> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    parse_millis(name, &raw)
}

fn parse_millis(name: &str, raw: &str) -> Result<Duration> {
    let millis: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a valid number of milliseconds", name))?;

    if millis == 0 {
        anyhow::bail!("{} must be greater than zero", name);
    }

    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.live_client_url, "https://127.0.0.1:2999/liveclientdata");
        assert_eq!(config.poll_interval, Duration::from_millis(1000));
        assert_eq!(config.request_timeout, Duration::from_millis(2000));
    }

    #[test]
    fn test_parse_millis() {
        assert_eq!(
            parse_millis("POLL_INTERVAL_MS", " 250 ").unwrap(),
            Duration::from_millis(250)
        );
        assert!(parse_millis("POLL_INTERVAL_MS", "0").is_err());
        assert!(parse_millis("POLL_INTERVAL_MS", "fast").is_err());
    }
}
