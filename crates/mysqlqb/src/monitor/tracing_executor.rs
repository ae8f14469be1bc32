use super::config::MonitorConfig;
use super::truncate_sql;
use crate::client::Executor;
use crate::error::{QbError, QbResult};
use crate::qb::Parameter;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::Level;

/// An [`Executor`] wrapper that logs every statement through `tracing`.
///
/// Events go to target `mysqlqb.sql` at the configured level, with the executor
/// operation, parameter count, elapsed time and outcome. Statements slower than
/// [`MonitorConfig::slow_query_threshold`] are repeated at WARN.
#[derive(Debug, Clone)]
pub struct TracingExecutor<E> {
    inner: E,
    config: MonitorConfig,
}

impl<E: Executor> TracingExecutor<E> {
    /// Wrap an executor with default settings.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            config: MonitorConfig::default(),
        }
    }

    /// Replace the monitor configuration.
    pub fn with_config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the statement timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.query_timeout = Some(timeout);
        self
    }

    /// The wrapped executor.
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Current configuration.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    async fn run<T, F>(&self, op: &'static str, sql: &str, param_count: usize, fut: F) -> QbResult<T>
    where
        F: Future<Output = QbResult<T>>,
    {
        let start = Instant::now();
        let result = match self.config.query_timeout {
            Some(limit) => match tokio::time::timeout(limit, fut).await {
                Ok(result) => result,
                Err(_) => Err(QbError::Timeout(limit)),
            },
            None => fut.await,
        };
        let elapsed = start.elapsed();
        self.emit(op, sql, param_count, elapsed, &result);
        result
    }

    fn emit<T>(&self, op: &str, sql: &str, param_count: usize, elapsed: Duration, result: &QbResult<T>) {
        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let sql = truncate_sql(sql, self.config.max_sql_length);
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        match result {
            Ok(_) => emit_at_level!(
                self.config.level,
                target: "mysqlqb.sql",
                op,
                param_count,
                elapsed_ms,
                sql = %sql,
            ),
            Err(err) => tracing::error!(
                target: "mysqlqb.sql",
                op,
                param_count,
                elapsed_ms,
                sql = %sql,
                error = %err,
            ),
        }

        if let Some(threshold) = self.config.slow_query_threshold
            && elapsed > threshold
        {
            tracing::warn!(
                target: "mysqlqb.sql",
                op,
                elapsed_ms,
                threshold_ms = threshold.as_secs_f64() * 1000.0,
                sql = %sql,
                "slow statement"
            );
        }
    }
}

impl<E: Executor> Executor for TracingExecutor<E> {
    type Row = E::Row;

    fn query(
        &self,
        sql: &str,
        params: &[Parameter],
    ) -> impl Future<Output = QbResult<Vec<Self::Row>>> + Send {
        self.run("query", sql, params.len(), self.inner.query(sql, params))
    }

    fn execute(&self, sql: &str, params: &[Parameter]) -> impl Future<Output = QbResult<u64>> + Send {
        self.run("execute", sql, params.len(), self.inner.execute(sql, params))
    }

    fn query_scalar(
        &self,
        sql: &str,
        params: &[Parameter],
    ) -> impl Future<Output = QbResult<i64>> + Send {
        self.run("query_scalar", sql, params.len(), self.inner.query_scalar(sql, params))
    }
}
