//! Client configuration parsed from environment variables.
//!
//! Every knob has a default so the client runs against a local backend with
//! no environment at all. Unparseable numeric values fall back to their
//! defaults instead of failing startup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DRAG_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Runtime settings shared by the API client and the canvas controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash.
    pub api_url: String,
    /// Per-request timeout. `None` disables it.
    pub request_timeout: Option<Duration>,
    /// Trailing delay before a dragged element's position is saved.
    pub drag_debounce: Duration,
    /// Maximum undo snapshots kept; 0 keeps all of them.
    pub history_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            request_timeout: Some(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
            drag_debounce: Duration::from_millis(DEFAULT_DRAG_DEBOUNCE_MS),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Build config from the process environment.
    ///
    /// - `INKSPIRE_API_URL`, else `NEXT_PUBLIC_API_URL`, else `http://localhost:8001`
    /// - `INKSPIRE_REQUEST_TIMEOUT_SECS`: default 30, `0` disables the timeout
    /// - `INKSPIRE_DRAG_DEBOUNCE_MS`: default 300
    /// - `INKSPIRE_HISTORY_LIMIT`: default 100, `0` for unbounded
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("INKSPIRE_API_URL")
            .or_else(|| lookup("NEXT_PUBLIC_API_URL"))
            .filter(|url| !url.trim().is_empty())
            .map_or_else(|| DEFAULT_API_URL.to_owned(), |url| normalize_base_url(&url));

        let timeout_secs = parse_or(lookup("INKSPIRE_REQUEST_TIMEOUT_SECS").as_deref(), DEFAULT_REQUEST_TIMEOUT_SECS);
        let debounce_ms = parse_or(lookup("INKSPIRE_DRAG_DEBOUNCE_MS").as_deref(), DEFAULT_DRAG_DEBOUNCE_MS);

        Self {
            api_url,
            request_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            drag_debounce: Duration::from_millis(debounce_ms),
            history_limit: parse_or(lookup("INKSPIRE_HISTORY_LIMIT").as_deref(), DEFAULT_HISTORY_LIMIT),
        }
    }

    /// Replace the backend origin, e.g. from a CLI flag.
    #[must_use]
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = normalize_base_url(api_url);
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

fn parse_or<T>(raw: Option<&str>, default: T) -> T
where
    T: std::str::FromStr,
{
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}
