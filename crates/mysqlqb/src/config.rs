//! Builder defaults.

use crate::error::QbResult;
use crate::qb::FoundRowsMode;
use serde::Deserialize;

/// Configuration applied to every builder created through it.
///
/// Can be built in code or read from TOML:
///
/// ```ignore
/// let config = mysqlqb::QbConfig::from_toml_str(r#"
///     found_rows = "query"
///     max_sql_length = 500
/// "#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QbConfig {
    /// Found-rows strategy for SELECT builders.
    pub found_rows: FoundRowsMode,
    /// Emit a `tracing` event for every executed statement.
    pub log_sql: bool,
    /// Also log the statement with parameters inlined (trace level).
    pub log_inline_params: bool,
    /// Truncate logged SQL to this many bytes. `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for QbConfig {
    fn default() -> Self {
        Self {
            found_rows: FoundRowsMode::Calc,
            log_sql: true,
            log_inline_params: false,
            max_sql_length: Some(200),
        }
    }
}

impl QbConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> QbResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Set the found-rows strategy.
    pub fn with_found_rows(mut self, mode: FoundRowsMode) -> Self {
        self.found_rows = mode;
        self
    }

    /// Enable or disable SQL logging.
    pub fn with_log_sql(mut self, on: bool) -> Self {
        self.log_sql = on;
        self
    }

    /// Enable or disable logging of the inlined (debug) statement.
    pub fn with_log_inline_params(mut self, on: bool) -> Self {
        self.log_inline_params = on;
        self
    }

    /// Set maximum SQL length to log.
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
