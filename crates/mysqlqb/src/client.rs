//! Execution collaborator trait.

use crate::error::QbResult;
use crate::qb::Parameter;

/// Anything that can run a named-parameter MySQL statement.
///
/// Implement this for a connection, a pooled connection, or a transaction. Parameters
/// are bound by name (`:p_0`), so their order in `params` carries no meaning.
/// Failures should be reported as [`QbError::Database`](crate::QbError::Database); the
/// builder passes them through unchanged and never retries.
pub trait Executor: Send + Sync {
    /// Row type produced by SELECT statements.
    type Row: Send;

    /// Run a SELECT and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[Parameter],
    ) -> impl std::future::Future<Output = QbResult<Vec<Self::Row>>> + Send;

    /// Run an INSERT/UPDATE/DELETE and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[Parameter],
    ) -> impl std::future::Future<Output = QbResult<u64>> + Send;

    /// Run a query returning a single integer (used for found-rows counts).
    fn query_scalar(
        &self,
        sql: &str,
        params: &[Parameter],
    ) -> impl std::future::Future<Output = QbResult<i64>> + Send;
}

/// Result of executing a built statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecOutcome<R> {
    /// Rows returned by a SELECT.
    Rows(Vec<R>),
    /// Rows affected by INSERT/UPDATE/DELETE/UPSERT.
    Affected(u64),
}

impl<R> ExecOutcome<R> {
    /// The returned rows; empty for non-SELECT statements.
    pub fn into_rows(self) -> Vec<R> {
        match self {
            ExecOutcome::Rows(rows) => rows,
            ExecOutcome::Affected(_) => Vec::new(),
        }
    }

    /// The affected-row count; `None` for SELECT.
    pub fn rows_affected(&self) -> Option<u64> {
        match self {
            ExecOutcome::Rows(_) => None,
            ExecOutcome::Affected(n) => Some(*n),
        }
    }
}
