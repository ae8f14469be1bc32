//! Statement builder for MySQL.
//!
//! One [`QueryBuilder`] produces one statement. Literal values are never spliced into
//! the SQL: each one is registered as a named parameter (`:p_0`, `:p_1`, ...) and the
//! executor binds them by name.
//!
//! # Usage
//!
//! ```ignore
//! use mysqlqb::{qb, FilterNode, Order};
//!
//! // SELECT with a declarative filter and found rows
//! let mut q = qb::select_as("users", "u")
//!     .select(&["id", "name"])
//!     .calc_found_rows(true)
//!     .filter(FilterNode::and(vec![
//!         FilterNode::eq("status", "active"),
//!         FilterNode::in_list("role", ["admin", "staff"]),
//!     ]))
//!     .order_by("u.id", Order::Desc)
//!     .page(2, 20);
//! let rows = q.fetch_all(&conn).await?;
//! let total = q.found_rows(&conn).await?;
//!
//! // UPSERT
//! qb::upsert("counters")
//!     .set("name", "visits")
//!     .set_insert("count", 1)
//!     .set_update_raw("count", "count + 1")
//!     .execute(&conn)
//!     .await?;
//! ```

mod builder;
mod debug;
mod filter;
mod found_rows;
mod param;
mod parts;

pub use builder::{Order, QueryBuilder, StatementKind};
pub use debug::render_debug_sql;
pub use filter::{CompareOp, FilterCompiler, FilterNode, ALWAYS_FALSE};
pub use found_rows::{FoundRowsMode, CALC_FOUND_ROWS, FOUND_ROWS_SQL, FOUND_ROWS_UNKNOWN};
pub use param::{ParamList, Parameter};
pub use parts::{Assignments, QueryParts};

/// Create a SELECT builder for the given table.
///
/// # Example
/// ```ignore
/// let q = mysqlqb::qb::select("users").filter(FilterNode::eq("id", 1));
/// ```
pub fn select(table: &str) -> QueryBuilder {
    QueryBuilder::new(StatementKind::Select, table)
}

/// Create a SELECT builder whose columns are qualified with `alias`.
pub fn select_as(table: &str, alias: &str) -> QueryBuilder {
    QueryBuilder::with_alias(StatementKind::Select, table, alias)
}

/// Create an INSERT builder for the given table.
pub fn insert(table: &str) -> QueryBuilder {
    QueryBuilder::new(StatementKind::Insert, table)
}

/// Create an UPDATE builder for the given table.
pub fn update(table: &str) -> QueryBuilder {
    QueryBuilder::new(StatementKind::Update, table)
}

/// Create an UPDATE builder with a table alias.
pub fn update_as(table: &str, alias: &str) -> QueryBuilder {
    QueryBuilder::with_alias(StatementKind::Update, table, alias)
}

/// Create a DELETE builder for the given table.
///
/// Without a filter or `where_raw` the statement deletes every row.
pub fn delete(table: &str) -> QueryBuilder {
    QueryBuilder::new(StatementKind::Delete, table)
}

/// Create a DELETE builder with a table alias.
pub fn delete_as(table: &str, alias: &str) -> QueryBuilder {
    QueryBuilder::with_alias(StatementKind::Delete, table, alias)
}

/// Create an `INSERT ... ON DUPLICATE KEY UPDATE` builder.
pub fn upsert(table: &str) -> QueryBuilder {
    QueryBuilder::new(StatementKind::Upsert, table)
}
