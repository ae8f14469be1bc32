//! # mysqlqb
//!
//! A parameterized SQL statement builder for MySQL.
//!
//! ## Features
//!
//! - **Bound values only**: literals become named parameters (`:p_0`, `:p_1`, ...)
//! - **Declarative filters**: nested AND/OR trees compiled to a WHERE clause
//! - **One builder, five statements**: SELECT, INSERT, UPDATE, DELETE and UPSERT
//!   (`INSERT ... ON DUPLICATE KEY UPDATE`)
//! - **Found rows**: total count of a paged SELECT via `SQL_CALC_FOUND_ROWS` or a
//!   separate `COUNT(*)` statement
//! - **Driver-agnostic**: execution goes through the [`Executor`] trait
//! - **Statement logging**: `tracing` events, optional timeout and slow-statement warnings
//!
//! ## Query Builder (qb)
//!
//! ```ignore
//! use mysqlqb::{qb, FilterNode, Order};
//!
//! // SELECT
//! let mut q = qb::select("users")
//!     .filter(FilterNode::eq("status", "active"))
//!     .order_by("created_at", Order::Desc)
//!     .limit(10);
//! let users = q.fetch_all(&conn).await?;
//!
//! // INSERT
//! qb::insert("users")
//!     .set("username", "alice")
//!     .set("email", "alice@example.com")
//!     .execute(&conn)
//!     .await?;
//!
//! // UPDATE
//! qb::update("users")
//!     .set("status", "inactive")
//!     .filter(FilterNode::eq("id", user_id))
//!     .execute(&conn)
//!     .await?;
//!
//! // DELETE
//! qb::delete("users")
//!     .filter(FilterNode::eq("id", user_id))
//!     .execute(&conn)
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod escape;
pub mod ident;
pub mod monitor;
pub mod qb;
pub mod value;

pub use client::{ExecOutcome, Executor};
pub use config::QbConfig;
pub use error::{QbError, QbResult};
pub use escape::{MySqlEscaper, ValueEscaper};
pub use ident::{field_name, is_reserved_word, quote_ident};
pub use monitor::{MonitorConfig, TracingExecutor};
pub use value::Value;

// Re-export qb module for easy access
pub use qb::{
    delete, delete_as, insert, select, select_as, update, update_as, upsert, CompareOp,
    FilterCompiler, FilterNode, FoundRowsMode, Order, ParamList, Parameter, QueryBuilder,
    QueryParts, StatementKind,
};
