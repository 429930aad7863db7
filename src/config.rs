//! Client configuration.
//!
//! Only the service base URL is environmental; timings have in-code defaults that
//! callers may override.

use anyhow::{Context, Result};
use reqwest::Url;
use std::time::Duration;

/// Environment variable holding the search service base URL, read by the CLI.
pub const BASE_URL_ENV: &str = "PAPER_SEARCH_URL";

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Pause in typing required before suggestions are fetched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Upper bound on a single service request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub debounce: Duration,
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Create a config for `base_url` with default timings.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid search service URL '{}'", base_url))?;

        if base_url.cannot_be_a_base() {
            anyhow::bail!("Search service URL '{}' cannot be used as a base", base_url);
        }

        Ok(Self {
            base_url,
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Resolve an endpoint path against the base URL.
    ///
    /// A base with a path prefix (`http://host/api`) keeps the prefix.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
            .with_context(|| format!("Failed to build URL for '{}'", path))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
