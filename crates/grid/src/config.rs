//! Client configuration.

use std::time::Duration;

use tracareer_core::application::DEFAULT_PAGE_SIZE;
use tracareer_core::format::DEFAULT_DISPLAY_OFFSET_MINUTES;

/// Quiet interval each editor kind waits after the last keystroke or pick
/// before committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    pub text: Duration,
    pub optional_text: Duration,
    pub number: Duration,
    pub remote: Duration,
    pub status: Duration,
    pub date: Duration,
    pub date_time: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            text: Duration::from_millis(2000),
            optional_text: Duration::from_millis(2000),
            number: Duration::from_millis(2000),
            remote: Duration::from_millis(1000),
            status: Duration::from_millis(1000),
            date: Duration::from_millis(1500),
            date_time: Duration::from_millis(300),
        }
    }
}

/// Settings for talking to the tracker API and rendering its data.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API server, without trailing slash.
    pub api_url: String,
    /// Rows per grid page.
    pub page_size: i64,
    /// Minutes east of UTC for tracker-card and toast timestamps.
    pub display_offset_minutes: i32,
    pub debounce: DebounceConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            display_offset_minutes: DEFAULT_DISPLAY_OFFSET_MINUTES,
            debounce: DebounceConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `TRACAREER_API_URL`          | `http://localhost:3000` |
    /// | `TRACAREER_PAGE_SIZE`        | `5`                     |
    /// | `DISPLAY_UTC_OFFSET_MINUTES` | `600`                   |
    ///
    /// # Panics
    ///
    /// Panics if a numeric variable is set but does not parse.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = std::env::var("TRACAREER_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let page_size: i64 = std::env::var("TRACAREER_PAGE_SIZE")
            .map(|v| v.parse().expect("TRACAREER_PAGE_SIZE must be a valid i64"))
            .unwrap_or(defaults.page_size);
        assert!(page_size > 0, "TRACAREER_PAGE_SIZE must be positive");

        let display_offset_minutes: i32 = std::env::var("DISPLAY_UTC_OFFSET_MINUTES")
            .map(|v| v.parse().expect("DISPLAY_UTC_OFFSET_MINUTES must be a valid i32"))
            .unwrap_or(defaults.display_offset_minutes);

        Self {
            api_url,
            page_size,
            display_offset_minutes,
            debounce: defaults.debounce,
        }
    }
}
