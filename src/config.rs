use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::scrapers::Throttle;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Cards visited per marketplace search page
    pub max_listings: usize,

    /// Network fetch deadline per search request
    pub fetch_timeout: Duration,

    /// Lower bound of the pre-fetch jitter window, in milliseconds
    pub delay_min_ms: u64,

    /// Upper bound of the pre-fetch jitter window, in milliseconds
    pub delay_max_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            max_listings: env::var("MARKET_SCOUT_MAX_LISTINGS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("MARKET_SCOUT_MAX_LISTINGS must be a valid number")?,

            fetch_timeout: Duration::from_secs(
                env::var("MARKET_SCOUT_FETCH_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("MARKET_SCOUT_FETCH_TIMEOUT_SECS must be a valid number")?,
            ),

            delay_min_ms: env::var("MARKET_SCOUT_DELAY_MIN_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .context("MARKET_SCOUT_DELAY_MIN_MS must be a valid number")?,

            delay_max_ms: env::var("MARKET_SCOUT_DELAY_MAX_MS")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("MARKET_SCOUT_DELAY_MAX_MS must be a valid number")?,
        })
    }

    pub fn throttle(&self) -> Throttle {
        Throttle::new(
            Duration::from_millis(self.delay_min_ms),
            Duration::from_millis(self.delay_max_ms),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_listings: 10,
            fetch_timeout: Duration::from_secs(10),
            delay_min_ms: 1000,
            delay_max_ms: 3000,
        }
    }
}
