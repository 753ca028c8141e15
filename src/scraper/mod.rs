//! Scraper module for fetching HTML content from the listing site
//!
//! This module provides the [`Transport`] seam used by the client and its
//! reqwest-backed implementation, with browser-like headers, polite delays
//! between requests and retry with backoff on throttling.

use rand::Rng;
use reqwest::header::COOKIE;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

/// Errors that can occur during fetch operations
#[derive(Error, Debug)]
pub enum ScraperError {
    /// Network-related errors (connection timeout, DNS failure, etc.)
    #[error("Failed to connect to server: {0}")]
    NetworkError(String),

    /// HTTP non-200 status code errors
    #[error("Server returned status {0}")]
    HttpError(u16),

    /// Error reading response body
    #[error("Failed to read response body: {0}")]
    ResponseError(String),

    /// Rate limited by server
    #[error("Rate limited, retry after delay")]
    RateLimited,

    /// A session token cannot be sent as a cookie value
    #[error("Token `{0}` is not a valid cookie value")]
    InvalidCookie(&'static str),
}

/// Anything that can GET a page and hand back its body
///
/// Implementations must report connection failures as
/// [`ScraperError::NetworkError`] so they stay distinguishable from
/// markup problems.
pub trait Transport {
    fn get(
        &self,
        url: &str,
        cookie_header: Option<&str>,
    ) -> impl Future<Output = Result<String, ScraperError>> + Send;
}

/// Opaque session credentials attached to episode-page requests
#[derive(Clone)]
pub struct SessionCookies {
    gogoanime_token: String,
    auth_token: String,
}

impl SessionCookies {
    pub fn new(gogoanime_token: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            gogoanime_token: gogoanime_token.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Render the `Cookie` header value (`gogoanime=..; auth=..`)
    pub fn header_value(&self) -> Result<String, ScraperError> {
        validate_cookie_value("gogoanime", &self.gogoanime_token)?;
        validate_cookie_value("auth", &self.auth_token)?;
        Ok(format!(
            "gogoanime={}; auth={}",
            self.gogoanime_token, self.auth_token
        ))
    }
}

// Tokens must stay out of logs.
impl std::fmt::Debug for SessionCookies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCookies")
            .field("gogoanime_token", &"<redacted>")
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

/// RFC 6265 cookie-octet: visible ASCII except `"`, `,`, `;` and `\`
fn validate_cookie_value(name: &'static str, value: &str) -> Result<(), ScraperError> {
    let valid = value
        .bytes()
        .all(|b| matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E));
    if valid {
        Ok(())
    } else {
        Err(ScraperError::InvalidCookie(name))
    }
}

/// Configuration for request pacing and retries
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Minimum delay between requests in milliseconds
    pub min_delay_ms: u64,
    /// Maximum delay between requests in milliseconds
    pub max_delay_ms: u64,
    /// Whether to rotate user agents
    pub rotate_user_agent: bool,
    /// Maximum attempts per request
    pub max_retries: u32,
    /// Base delay for exponential backoff in milliseconds
    pub backoff_base_ms: u64,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 250,
            max_delay_ms: 750,
            rotate_user_agent: true,
            max_retries: 3,
            backoff_base_ms: 1000,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// List of realistic user agents for rotation
const USER_AGENTS: &[&str] = &[
    // Chrome on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Chrome on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Firefox on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    // Safari on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

/// reqwest-backed [`Transport`]
pub struct Scraper {
    client: Client,
    config: ScraperConfig,
    request_count: AtomicUsize,
}

impl Default for Scraper {
    fn default() -> Self {
        Self::new()
    }
}

impl Scraper {
    /// Create a new Scraper with default configuration
    pub fn new() -> Self {
        Self::with_config(ScraperConfig::default())
    }

    /// Create a new Scraper with custom configuration
    pub fn with_config(config: ScraperConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            config,
            request_count: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    fn get_user_agent(&self) -> &'static str {
        if self.config.rotate_user_agent {
            let idx = rand::thread_rng().gen_range(0..USER_AGENTS.len());
            USER_AGENTS[idx]
        } else {
            USER_AGENTS[0]
        }
    }

    async fn apply_delay(&self) {
        let (min, max) = (self.config.min_delay_ms, self.config.max_delay_ms);
        if max == 0 {
            return;
        }
        let delay = rand::thread_rng().gen_range(min.min(max)..=max);
        sleep(Duration::from_millis(delay)).await;
    }

    async fn apply_backoff(&self, attempt: u32) {
        let delay = self.config.backoff_base_ms * 2u64.pow(attempt);
        let jitter = rand::thread_rng().gen_range(0..500);
        sleep(Duration::from_millis(delay + jitter)).await;
    }

    /// Fetch a page, pacing and retrying on 429/5xx
    pub async fn fetch_page(
        &self,
        url: &str,
        cookie_header: Option<&str>,
    ) -> Result<String, ScraperError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        if count > 0 {
            self.apply_delay().await;
        }

        let mut last_error = None;

        for attempt in 0..self.config.max_retries.max(1) {
            if attempt > 0 {
                self.apply_backoff(attempt).await;
            }

            match self.do_fetch(url, cookie_header).await {
                Ok(html) => return Ok(html),
                Err(ScraperError::RateLimited) => {
                    tracing::warn!(url, attempt = attempt + 1, "Rate limited, backing off");
                    last_error = Some(ScraperError::RateLimited);
                }
                Err(ScraperError::HttpError(status)) if status >= 500 => {
                    tracing::warn!(url, status, attempt = attempt + 1, "Server error, retrying");
                    last_error = Some(ScraperError::HttpError(status));
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(ScraperError::NetworkError("Max retries exceeded".to_string())))
    }

    async fn do_fetch(&self, url: &str, cookie_header: Option<&str>) -> Result<String, ScraperError> {
        let mut request = self
            .client
            .get(url)
            .header("User-Agent", self.get_user_agent())
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Cache-Control", "no-cache")
            .header("Upgrade-Insecure-Requests", "1");

        if let Some(cookie) = cookie_header {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ScraperError::NetworkError("Connection timeout".to_string())
            } else if e.is_connect() {
                ScraperError::NetworkError("Failed to connect to server".to_string())
            } else if e.is_builder() {
                ScraperError::InvalidCookie("cookie")
            } else {
                ScraperError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ScraperError::RateLimited);
        }
        if status != StatusCode::OK {
            return Err(ScraperError::HttpError(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| ScraperError::ResponseError(e.to_string()))
    }

    /// Reset request counter so the next request goes out without delay
    pub fn reset_counter(&self) {
        self.request_count.store(0, Ordering::SeqCst);
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

impl Transport for Scraper {
    fn get(
        &self,
        url: &str,
        cookie_header: Option<&str>,
    ) -> impl Future<Output = Result<String, ScraperError>> + Send {
        self.fetch_page(url, cookie_header)
    }
}
