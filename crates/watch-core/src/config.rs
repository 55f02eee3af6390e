//! Runtime configuration.
//!
//! There is no configuration file. Provider settings come from
//! `TRAVIS_ENDPOINT` / `TRAVIS_TOKEN`, log format from
//! `TRAVIS_WATCH_LOG_FORMAT`, and everything else is a fixed default.

use std::time::Duration;

use tracing::Level;
use travis_api::TravisConfig;

/// Redraw cadence of the status view.
pub const RENDER_INTERVAL: Duration = Duration::from_millis(100);

/// Section order of the status view. Operating systems not listed here are
/// appended in the order they are first reported.
pub const DEFAULT_OS_ORDER: &[&str] = &["osx", "linux"];

/// Watcher configuration
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub travis: TravisConfig,
    pub render_interval: Duration,
    pub os_order: Vec<String>,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
    /// Default log level when `RUST_LOG` is unset
    pub log_level: Level,
}

impl Default for WatchConfig {
    fn default() -> Self {
        WatchConfig {
            travis: TravisConfig::default(),
            render_interval: RENDER_INTERVAL,
            os_order: DEFAULT_OS_ORDER.iter().map(|s| s.to_string()).collect(),
            log_json: std::env::var("TRAVIS_WATCH_LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            log_level: Level::WARN,
        }
    }
}

impl WatchConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Replace the provider configuration
    pub fn with_travis(mut self, travis: TravisConfig) -> Self {
        self.travis = travis;
        self
    }
}
