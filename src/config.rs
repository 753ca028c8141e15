//! Configuration module for the AniKimi client
//!
//! Handles loading environment variables and client configuration.

use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::scraper::{ScraperConfig, SessionCookies};

pub const DEFAULT_BASE_URL: &str = "https://gogoanime.ai";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the listing site, without trailing slash
    pub base_url: String,
    /// Credentials sent with episode-page requests
    pub cookies: SessionCookies,
    /// Request pacing and retry settings
    pub scraper: ScraperConfig,
}

impl Config {
    pub fn new(base_url: &str, cookies: SessionCookies) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cookies,
            scraper: ScraperConfig::default(),
        }
    }

    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let gogoanime_token =
            lookup("GOGOANIME_TOKEN").ok_or(ConfigError::MissingVar("GOGOANIME_TOKEN"))?;
        let auth_token = lookup("AUTH_TOKEN").ok_or(ConfigError::MissingVar("AUTH_TOKEN"))?;
        let base_url = lookup("ANIKIMI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let defaults = ScraperConfig::default();
        let parsed = |key: &str, default| parse_or(lookup(key), default);

        let mut config = Self::new(&base_url, SessionCookies::new(gogoanime_token, auth_token));
        config.scraper = ScraperConfig {
            max_retries: parsed("ANIKIMI_MAX_RETRIES", defaults.max_retries as u64) as u32,
            min_delay_ms: parsed("ANIKIMI_MIN_DELAY_MS", defaults.min_delay_ms),
            max_delay_ms: parsed("ANIKIMI_MAX_DELAY_MS", defaults.max_delay_ms),
            timeout_secs: parsed("ANIKIMI_TIMEOUT_SECS", defaults.timeout_secs),
            ..defaults
        };
        Ok(config)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
