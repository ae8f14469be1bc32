use std::time::Duration;
use tracing::Level;

/// Configuration for [`TracingExecutor`](super::TracingExecutor).
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Statement timeout. `None` means no timeout (default).
    pub query_timeout: Option<Duration>,
    /// Statements slower than this are logged again at WARN.
    pub slow_query_threshold: Option<Duration>,
    /// Level of the per-statement event.
    pub level: Level,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            query_timeout: None,
            slow_query_threshold: None,
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl MonitorConfig {
    /// Create a new configuration with defaults (DEBUG level, no timeout).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the statement timeout.
    ///
    /// Statements exceeding it return [`QbError::Timeout`](crate::QbError::Timeout).
    /// The underlying future is dropped; server-side cancellation is up to the executor.
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    /// Set the slow statement threshold.
    pub fn with_slow_query_threshold(mut self, threshold: Duration) -> Self {
        self.slow_query_threshold = Some(threshold);
        self
    }

    /// Override the tracing event level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}
