//! Total-row-count ("found rows") strategies for paginated SELECTs.

use crate::qb::builder::{assemble, StatementKind};
use crate::qb::parts::QueryParts;
use serde::Deserialize;

/// Value reported by the found-rows accessor before a count is known.
pub const FOUND_ROWS_UNKNOWN: i64 = -1;

/// Scalar query that reads the count computed by `SQL_CALC_FOUND_ROWS`.
pub const FOUND_ROWS_SQL: &str = "SELECT FOUND_ROWS()";

/// Select modifier that makes MySQL remember the unlimited row count.
pub const CALC_FOUND_ROWS: &str = "SQL_CALC_FOUND_ROWS";

/// How a builder obtains the row count of a SELECT ignoring LIMIT/OFFSET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoundRowsMode {
    /// Never computed; the accessor stays at [`FOUND_ROWS_UNKNOWN`].
    None,
    /// `SELECT SQL_CALC_FOUND_ROWS ...` followed by `SELECT FOUND_ROWS()`.
    ///
    /// The second query must run on the same connection as the first.
    #[default]
    Calc,
    /// A separate `SELECT COUNT(*)` statement with the same filter.
    Query,
}

/// Count query armed by `execute`, run lazily by `found_rows`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingCount {
    Calc,
    Query(String),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FoundRows {
    pub(crate) pending: Option<PendingCount>,
    pub(crate) count: Option<i64>,
}

impl FoundRows {
    /// Forget any previous result and arm `pending`.
    pub(crate) fn arm(&mut self, pending: Option<PendingCount>) {
        self.pending = pending;
        self.count = None;
    }

    pub(crate) fn cached(&self) -> i64 {
        self.count.unwrap_or(FOUND_ROWS_UNKNOWN)
    }
}

/// Alias of the derived table wrapped around a DISTINCT select.
const DISTINCT_COUNT_ALIAS: &str = "counted";

/// Derive the parts of the COUNT statement used by [`FoundRowsMode::Query`].
///
/// Ordering and paging are dropped and the select list becomes `COUNT(*)`. A DISTINCT
/// select over explicit columns is kept whole as a derived table, so aliased or
/// aggregate select items count the same rows the main query returns.
pub(crate) fn count_parts(parts: &QueryParts) -> QueryParts {
    let mut count = parts.clone();
    count.order_by.clear();
    count.limit = -1;
    count.offset = 0;

    if parts.has_modifier("DISTINCT") && !parts.select_columns.is_empty() {
        count.select_modifiers = vec!["DISTINCT".to_string()];
        let inner = assemble(StatementKind::Select, &count);
        count.table_target = format!("({inner}) AS {DISTINCT_COUNT_ALIAS}");
        count.where_sql.clear();
    }

    count.select_modifiers.clear();
    count.select_columns = vec!["COUNT(*)".to_string()];
    count
}
