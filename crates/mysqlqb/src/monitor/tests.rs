use super::*;
use crate::client::Executor;
use crate::error::{QbError, QbResult};
use crate::qb::Parameter;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::Level;

// ── Shared DummyExecutor for tests ──

#[derive(Default)]
struct DummyExecutor {
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl DummyExecutor {
    fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        }
    }

    async fn pause(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Executor for DummyExecutor {
    type Row = u32;

    async fn query(&self, _: &str, params: &[Parameter]) -> QbResult<Vec<u32>> {
        self.pause().await;
        Ok((0..params.len() as u32).collect())
    }

    async fn execute(&self, sql: &str, _: &[Parameter]) -> QbResult<u64> {
        self.pause().await;
        if sql.starts_with("DELETE") {
            return Err(QbError::database(std::io::Error::other("connection reset")));
        }
        Ok(3)
    }

    async fn query_scalar(&self, _: &str, _: &[Parameter]) -> QbResult<i64> {
        self.pause().await;
        Ok(42)
    }
}

#[test]
fn test_truncate_sql() {
    assert_eq!(truncate_sql("SELECT * FROM users", Some(10)), "SELECT * F...");
    assert_eq!(truncate_sql("SELECT 1", Some(10)), "SELECT 1");
    assert_eq!(truncate_sql("SELECT * FROM users", None), "SELECT * FROM users");
}

#[test]
fn test_truncate_sql_respects_char_boundary() {
    // "é" is two bytes; cutting at byte 9 would split it.
    let sql = "SELECT 'é'";
    assert_eq!(truncate_sql_bytes(sql, 9), "SELECT '");
    assert_eq!(truncate_sql_bytes(sql, 100), sql);
}

#[test]
fn test_monitor_config_builder() {
    let config = MonitorConfig::new()
        .with_query_timeout(Duration::from_secs(5))
        .with_slow_query_threshold(Duration::from_millis(250))
        .with_level(Level::INFO)
        .no_truncate();

    assert_eq!(config.query_timeout, Some(Duration::from_secs(5)));
    assert_eq!(config.slow_query_threshold, Some(Duration::from_millis(250)));
    assert_eq!(config.level, Level::INFO);
    assert_eq!(config.max_sql_length, None);
    assert_eq!(MonitorConfig::default().max_sql_length, Some(200));
}

#[tokio::test]
async fn test_tracing_executor_delegates() {
    let executor = TracingExecutor::new(DummyExecutor::default());
    let params = [Parameter::new("p_0", 1), Parameter::new("p_1", 2)];

    let rows = executor.query("SELECT * FROM t", &params).await.unwrap();
    assert_eq!(rows, vec![0, 1]);
    assert_eq!(executor.execute("UPDATE t SET a = 1", &[]).await.unwrap(), 3);
    assert_eq!(executor.query_scalar("SELECT FOUND_ROWS()", &[]).await.unwrap(), 42);
    assert_eq!(executor.inner().calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_tracing_executor_passes_errors_through() {
    let executor = TracingExecutor::new(DummyExecutor::default());
    let err = executor.execute("DELETE FROM t", &[]).await.unwrap_err();
    assert!(err.is_database());
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn test_tracing_executor_timeout() {
    let config = MonitorConfig::new().with_query_timeout(Duration::from_millis(5));
    let executor =
        TracingExecutor::new(DummyExecutor::slow(Duration::from_millis(500))).with_config(config);

    let err = executor.query("SELECT SLEEP(1)", &[]).await.unwrap_err();
    assert!(err.is_timeout());
    assert!(matches!(err, QbError::Timeout(d) if d == Duration::from_millis(5)));

    let executor = TracingExecutor::new(DummyExecutor::slow(Duration::from_millis(500)))
        .with_timeout(Duration::from_millis(5));
    assert!(executor.execute("UPDATE t SET a = 1", &[]).await.unwrap_err().is_timeout());
}

#[tokio::test]
async fn test_slow_statement_still_succeeds() {
    let config = MonitorConfig::new()
        .with_query_timeout(Duration::from_secs(5))
        .with_slow_query_threshold(Duration::from_millis(1));
    let executor =
        TracingExecutor::new(DummyExecutor::slow(Duration::from_millis(10))).with_config(config);

    assert_eq!(executor.query_scalar("SELECT 1", &[]).await.unwrap(), 42);
}
