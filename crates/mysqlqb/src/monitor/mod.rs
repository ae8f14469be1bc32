//! Statement logging and timing for executors.
//!
//! [`TracingExecutor`] wraps any [`Executor`](crate::Executor) and emits one `tracing`
//! event per statement, with elapsed time and an optional timeout:
//!
//! ```rust,ignore
//! use mysqlqb::monitor::{MonitorConfig, TracingExecutor};
//! use std::time::Duration;
//!
//! let config = MonitorConfig::new()
//!     .with_query_timeout(Duration::from_secs(30))
//!     .with_slow_query_threshold(Duration::from_secs(1));
//!
//! let executor = TracingExecutor::new(conn).with_config(config);
//! qb.execute(&executor).await?;
//! ```

mod config;
mod tracing_executor;

#[cfg(test)]
mod tests;

pub use config::MonitorConfig;
pub use tracing_executor::TracingExecutor;

/// Truncate `sql` to at most `max_bytes`, backing off to a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Truncate for logging, appending `...` when anything was cut.
pub(crate) fn truncate_sql(sql: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
        _ => sql.to_string(),
    }
}
