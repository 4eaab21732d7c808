use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

/// Server-side configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the data-provider service
    pub api_base: String,
    pub request_timeout: Duration,
    /// City shown first if the service offers it
    pub default_city: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            api_base: env::var("API_BASE").unwrap_or_else(|_| "http://localhost:8000".to_string()),
            request_timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            default_city: env::var("DEFAULT_CITY").unwrap_or_else(|_| "Berlin".to_string()),
        })
    }
}
