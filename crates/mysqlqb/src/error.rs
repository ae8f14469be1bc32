//! Error types for mysqlqb

use thiserror::Error;

/// Result type alias for mysqlqb operations
pub type QbResult<T> = Result<T, QbError>;

/// Error types for building and executing statements
#[derive(Debug, Error)]
pub enum QbError {
    /// Builder used in an invalid state (e.g. mutated after `build()`)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error reported by the executor, passed through unmodified
    #[error("Database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A value outside the supported scalar set {bool, integer, double, string, null}
    #[error("Unsupported value type: {0}")]
    UnsupportedType(String),

    /// Statement timeout
    #[error("Query timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// Config file could not be parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl QbError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Wrap an executor error
    pub fn database(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Database(err.into())
    }

    /// Create an unsupported type error
    pub fn unsupported_type(message: impl Into<String>) -> Self {
        Self::UnsupportedType(message.into())
    }

    /// Check if this is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Check if this error came from the executor
    pub fn is_database(&self) -> bool {
        matches!(self, Self::Database(_))
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

impl From<toml::de::Error> for QbError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
