//! The statement builder: fluent setters, clause assembly, execution.

use crate::client::{ExecOutcome, Executor};
use crate::config::QbConfig;
use crate::error::{QbError, QbResult};
use crate::escape::{MySqlEscaper, ValueEscaper};
use crate::ident::{field_name, is_reserved_word, quote_ident};
use crate::monitor::truncate_sql;
use crate::qb::debug::render_debug_sql;
use crate::qb::filter::{FilterCompiler, FilterNode};
use crate::qb::found_rows::{
    count_parts, FoundRows, FoundRowsMode, PendingCount, CALC_FOUND_ROWS, FOUND_ROWS_SQL,
};
use crate::qb::param::{ParamList, Parameter};
use crate::qb::parts::{Assignments, QueryParts};
use crate::value::Value;
use std::fmt;

/// Row cap MySQL documents for "OFFSET without LIMIT".
const MAX_ROWS: &str = "18446744073709551615";

/// Kind of statement a builder produces. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    /// `INSERT ... ON DUPLICATE KEY UPDATE ...`
    Upsert,
}

impl StatementKind {
    /// Whether column references may be qualified with the table alias.
    pub const fn supports_alias(self) -> bool {
        matches!(self, StatementKind::Select | StatementKind::Update | StatementKind::Delete)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Upsert => "UPSERT",
        })
    }
}

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BuildState {
    Unbuilt,
    Built(String),
}

/// Fluent builder for one MySQL statement.
///
/// Setters consume and return the builder. The first call to [`QueryBuilder::build`]
/// compiles the filter, assembles the SQL and caches it; the builder is single-use
/// from then on. Setters called after `build()` leave the statement untouched and
/// make [`QueryBuilder::validate`] (and therefore `execute`) fail with
/// [`QbError::Configuration`].
///
/// ```ignore
/// use mysqlqb::{qb, FilterNode, Order};
///
/// let mut q = qb::select_as("users", "u")
///     .select(&["id", "name"])
///     .filter(FilterNode::eq("status", "active"))
///     .order_by("u.id", Order::Desc)
///     .limit(20);
///
/// assert_eq!(
///     q.build(),
///     "SELECT u.id, u.name FROM users u WHERE u.status = :p_0 ORDER BY u.id DESC LIMIT 20"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    kind: StatementKind,
    alias: Option<String>,
    parts: QueryParts,
    params: ParamList,
    filters: Vec<FilterNode>,
    state: BuildState,
    found_rows_mode: FoundRowsMode,
    found_rows: FoundRows,
    config: QbConfig,
    build_error: Option<String>,
}

impl QueryBuilder {
    /// Create a builder with the default configuration and no alias.
    pub fn new(kind: StatementKind, table: &str) -> Self {
        Self::with_config(kind, table, None, &QbConfig::default())
    }

    /// Create a builder whose columns are qualified with `alias`.
    pub fn with_alias(kind: StatementKind, table: &str, alias: &str) -> Self {
        Self::with_config(kind, table, Some(alias), &QbConfig::default())
    }

    /// Create a builder with an explicit configuration.
    ///
    /// The alias is ignored for INSERT and UPSERT, whose targets cannot be aliased.
    pub fn with_config(
        kind: StatementKind,
        table: &str,
        alias: Option<&str>,
        config: &QbConfig,
    ) -> Self {
        let alias = alias
            .filter(|a| kind.supports_alias() && !a.is_empty())
            .map(str::to_string);

        let table_ref = if is_reserved_word(table) {
            quote_ident(table)
        } else {
            table.to_string()
        };

        let mut parts = QueryParts::new();
        match kind {
            StatementKind::Insert | StatementKind::Upsert => parts.insert_target = table_ref,
            _ => {
                parts.table_target = match &alias {
                    Some(a) => format!("{table_ref} {a}"),
                    None => table_ref,
                };
            }
        }

        Self {
            kind,
            alias,
            parts,
            params: ParamList::new(),
            filters: Vec::new(),
            state: BuildState::Unbuilt,
            found_rows_mode: config.found_rows,
            found_rows: FoundRows::default(),
            config: config.clone(),
            build_error: None,
        }
    }

    // ==================== Accessors ====================

    /// Statement kind.
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Active alias, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Found-rows strategy chosen at construction.
    pub fn found_rows_mode(&self) -> FoundRowsMode {
        self.found_rows_mode
    }

    /// Clause fragments collected so far.
    pub fn parts(&self) -> &QueryParts {
        &self.parts
    }

    /// Bound parameters in registration order.
    ///
    /// Filter parameters are registered by [`QueryBuilder::build`], so the list is only
    /// complete after the statement has been built.
    pub fn params(&self) -> &[Parameter] {
        self.params.all()
    }

    /// Whether `build()` has already run.
    pub fn is_built(&self) -> bool {
        matches!(self.state, BuildState::Built(_))
    }

    /// Resolve a column name the way this builder does (reserved-word quoting, alias).
    pub fn field_name(&self, name: &str) -> String {
        field_name(name, self.alias.as_deref())
    }

    // ==================== SELECT list ====================

    /// Append columns to the select list, resolved through [`QueryBuilder::field_name`].
    pub fn select(self, columns: &[&str]) -> Self {
        self.mutate("select", |qb| {
            for col in columns {
                let col = qb.field_name(col);
                qb.parts.select_columns.push(col);
            }
        })
    }

    /// Append a raw expression to the select list.
    pub fn add_select(self, expr: &str) -> Self {
        self.mutate("add_select", |qb| {
            qb.parts.select_columns.push(expr.to_string())
        })
    }

    /// Toggle `SELECT DISTINCT`.
    pub fn distinct(self, flag: bool) -> Self {
        self.mutate("distinct", |qb| qb.parts.toggle_modifier("DISTINCT", flag))
    }

    /// Toggle `SQL_CALC_FOUND_ROWS`. Ignored unless the found-rows mode is
    /// [`FoundRowsMode::Calc`].
    pub fn calc_found_rows(self, flag: bool) -> Self {
        self.mutate("calc_found_rows", |qb| {
            if qb.found_rows_mode == FoundRowsMode::Calc {
                qb.parts.toggle_modifier(CALC_FOUND_ROWS, flag);
            }
        })
    }

    // ==================== Assignments ====================

    /// Assign a bound value, used by INSERT, UPDATE and both halves of UPSERT.
    ///
    /// `Value::Null` is written as the `NULL` keyword without a parameter.
    pub fn set(self, column: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.mutate("set", |qb| {
            let (key, expr) = qb.bind_assignment(column, value);
            qb.parts.assign.insert(key, expr);
        })
    }

    /// Assign a bound value used only when inserting.
    pub fn set_insert(self, column: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.mutate("set_insert", |qb| {
            let (key, expr) = qb.bind_assignment(column, value);
            qb.parts.assign_on_insert.insert(key, expr);
        })
    }

    /// Assign a bound value used only when updating.
    pub fn set_update(self, column: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.mutate("set_update", |qb| {
            let (key, expr) = qb.bind_assignment(column, value);
            qb.parts.assign_on_update.insert(key, expr);
        })
    }

    /// Assign a raw SQL expression. The fragment is trusted as-is.
    pub fn set_raw(self, column: &str, expr: &str) -> Self {
        self.mutate("set_raw", |qb| {
            let key = qb.field_name(column);
            qb.parts.assign.insert(key, expr);
        })
    }

    /// Assign a raw SQL expression used only when inserting.
    pub fn set_insert_raw(self, column: &str, expr: &str) -> Self {
        self.mutate("set_insert_raw", |qb| {
            let key = qb.field_name(column);
            qb.parts.assign_on_insert.insert(key, expr);
        })
    }

    /// Assign a raw SQL expression used only when updating.
    pub fn set_update_raw(self, column: &str, expr: &str) -> Self {
        self.mutate("set_update_raw", |qb| {
            let key = qb.field_name(column);
            qb.parts.assign_on_update.insert(key, expr);
        })
    }

    /// [`QueryBuilder::set`] for every `(column, value)` pair.
    pub fn set_values<K, V, I>(self, values: I) -> Self
    where
        K: AsRef<str>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        values
            .into_iter()
            .fold(self, |qb, (k, v)| qb.set(k.as_ref(), v))
    }

    fn bind_assignment(&mut self, column: &str, value: Value) -> (String, String) {
        let key = self.field_name(column);
        let expr = if value.is_null() {
            "NULL".to_string()
        } else {
            self.params.bind(value)
        };
        (key, expr)
    }

    // ==================== WHERE ====================

    /// Set a precomposed WHERE expression. Takes precedence over [`QueryBuilder::filter`].
    pub fn where_raw(self, sql: &str) -> Self {
        self.mutate("where_raw", |qb| qb.parts.where_sql = sql.to_string())
    }

    /// Add a top-level filter node. Top-level nodes are ANDed together.
    pub fn filter(self, node: FilterNode) -> Self {
        self.mutate("filter", |qb| qb.filters.push(node))
    }

    // ==================== Ordering & paging ====================

    /// Replace the ORDER BY list.
    pub fn order(self, columns: &[(&str, Order)]) -> Self {
        self.mutate("order", |qb| {
            qb.parts.order_by = columns
                .iter()
                .map(|(col, dir)| format!("{} {}", col, dir.as_sql()))
                .collect();
        })
    }

    /// Append one ORDER BY column.
    pub fn order_by(self, column: &str, dir: Order) -> Self {
        self.mutate("order_by", |qb| {
            qb.parts.order_by.push(format!("{} {}", column, dir.as_sql()))
        })
    }

    /// Set LIMIT. Negative removes it; `0` is kept and returns no rows.
    pub fn limit(self, n: i64) -> Self {
        self.mutate("limit", |qb| qb.parts.limit = n)
    }

    /// Set OFFSET. Values `<= 0` remove it.
    pub fn offset(self, n: i64) -> Self {
        self.mutate("offset", |qb| qb.parts.offset = n.max(0))
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    /// An offset past `i64::MAX` saturates, so huge page numbers return no rows.
    pub fn page(self, page: i64, per_page: i64) -> Self {
        let p = page.max(1);
        let size = per_page.max(1);
        self.limit(size).offset((p - 1).saturating_mul(size))
    }

    fn mutate(mut self, setter: &'static str, f: impl FnOnce(&mut Self)) -> Self {
        if self.is_built() {
            tracing::warn!(target: "mysqlqb", setter, "builder modified after build(); change ignored");
            self.build_error.get_or_insert_with(|| {
                format!("`{setter}` called after build(); create a new builder for another statement")
            });
            return self;
        }
        f(&mut self);
        self
    }

    // ==================== Build ====================

    /// Build the SQL text, compiling the filter on the first call.
    ///
    /// The result is cached; later calls return the same string.
    pub fn build(&mut self) -> &str {
        if !self.is_built() {
            if !self.filters.is_empty() && self.parts.where_sql.is_empty() {
                let mut compiler = FilterCompiler::new(&mut self.params, self.alias.as_deref());
                self.parts.where_sql = compiler.compile_all(&self.filters);
            }
            self.state = BuildState::Built(assemble(self.kind, &self.parts));
        }
        match &self.state {
            BuildState::Built(sql) => sql.as_str(),
            BuildState::Unbuilt => "",
        }
    }

    /// Build and return the statement with parameter values inlined.
    ///
    /// For logs only: never execute the returned string.
    pub fn to_debug_sql(&mut self) -> String {
        self.debug_sql(&MySqlEscaper)
    }

    /// [`QueryBuilder::to_debug_sql`] with a custom escaper.
    pub fn debug_sql(&mut self, escaper: &dyn ValueEscaper) -> String {
        self.build();
        let sql = match &self.state {
            BuildState::Built(sql) => sql.as_str(),
            BuildState::Unbuilt => "",
        };
        render_debug_sql(sql, &self.params, escaper)
    }

    /// Check builder state before execution.
    pub fn validate(&self) -> QbResult<()> {
        if let Some(err) = &self.build_error {
            return Err(QbError::configuration(err.clone()));
        }
        let target = match self.kind {
            StatementKind::Insert | StatementKind::Upsert => &self.parts.insert_target,
            _ => &self.parts.table_target,
        };
        if target.is_empty() {
            return Err(QbError::configuration(format!("{} statement has no table", self.kind)));
        }
        let has_assignments = match self.kind {
            StatementKind::Insert | StatementKind::Upsert => {
                !self.parts.assign.is_empty() || !self.parts.assign_on_insert.is_empty()
            }
            StatementKind::Update => {
                !self.parts.assign.is_empty() || !self.parts.assign_on_update.is_empty()
            }
            StatementKind::Select | StatementKind::Delete => true,
        };
        if !has_assignments {
            return Err(QbError::configuration(format!(
                "{} statement has no assignments",
                self.kind
            )));
        }
        Ok(())
    }

    // ==================== Execution ====================

    /// Build and run the statement.
    ///
    /// SELECT returns rows, everything else the affected-row count. For SELECTs this
    /// also arms the found-rows query; see [`QueryBuilder::found_rows`].
    pub async fn execute<E: Executor>(&mut self, executor: &E) -> QbResult<ExecOutcome<E::Row>> {
        self.validate()?;
        let sql = self.build().to_string();
        // A count is only meaningful for a SELECT that actually ran.
        self.found_rows.arm(None);
        self.log_statement(&sql);

        let params = self.params.all();
        if self.kind == StatementKind::Select {
            let rows = executor.query(&sql, params).await?;
            self.arm_found_rows();
            Ok(ExecOutcome::Rows(rows))
        } else {
            Ok(ExecOutcome::Affected(executor.execute(&sql, params).await?))
        }
    }

    /// Run a SELECT and return its rows.
    pub async fn fetch_all<E: Executor>(&mut self, executor: &E) -> QbResult<Vec<E::Row>> {
        if self.kind != StatementKind::Select {
            return Err(QbError::configuration(format!(
                "fetch_all on a {} statement",
                self.kind
            )));
        }
        Ok(self.execute(executor).await?.into_rows())
    }

    /// Total rows matching the last executed SELECT, ignoring LIMIT/OFFSET.
    ///
    /// Runs the armed count query on the first call and caches the result. Returns
    /// [`FOUND_ROWS_UNKNOWN`](crate::qb::FOUND_ROWS_UNKNOWN) when nothing was armed
    /// (mode `None`, a non-SELECT statement, or `execute` not called yet). In `Calc`
    /// mode pass the same connection the SELECT ran on.
    pub async fn found_rows<E: Executor>(&mut self, executor: &E) -> QbResult<i64> {
        if let Some(count) = self.found_rows.count {
            return Ok(count);
        }
        let count = match &self.found_rows.pending {
            None => return Ok(self.found_rows.cached()),
            Some(PendingCount::Calc) => executor.query_scalar(FOUND_ROWS_SQL, &[]).await?,
            Some(PendingCount::Query(sql)) => executor.query_scalar(sql, self.params.all()).await?,
        };
        self.found_rows.count = Some(count);
        Ok(count)
    }

    /// Cached found-rows value without touching the database.
    pub fn found_rows_cached(&self) -> i64 {
        self.found_rows.cached()
    }

    /// SQL of the count query for [`FoundRowsMode::Query`], with the same WHERE.
    ///
    /// Meaningful once the statement is built; `None` for non-SELECT statements.
    pub fn count_sql(&self) -> Option<String> {
        (self.kind == StatementKind::Select)
            .then(|| assemble(StatementKind::Select, &count_parts(&self.parts)))
    }

    fn arm_found_rows(&mut self) {
        let pending = match (self.kind, self.found_rows_mode) {
            (StatementKind::Select, FoundRowsMode::Calc)
                if self.parts.has_modifier(CALC_FOUND_ROWS) =>
            {
                Some(PendingCount::Calc)
            }
            (StatementKind::Select, FoundRowsMode::Query) => self.count_sql().map(PendingCount::Query),
            _ => None,
        };
        self.found_rows.arm(pending);
    }

    fn log_statement(&self, sql: &str) {
        if !self.config.log_sql {
            return;
        }
        tracing::debug!(
            target: "mysqlqb.sql",
            kind = %self.kind,
            param_count = self.params.len(),
            sql = %truncate_sql(sql, self.config.max_sql_length),
        );
        if self.config.log_inline_params {
            let inlined = render_debug_sql(sql, &self.params, &MySqlEscaper);
            tracing::trace!(
                target: "mysqlqb.sql",
                kind = %self.kind,
                inlined = %truncate_sql(&inlined, self.config.max_sql_length),
            );
        }
    }
}

/// Assemble the final SQL for `kind` from `parts`.
///
/// Clause order: head, SET, ON DUPLICATE KEY UPDATE, WHERE, ORDER BY, LIMIT, OFFSET.
pub(crate) fn assemble(kind: StatementKind, parts: &QueryParts) -> String {
    let mut sql: Vec<String> = Vec::new();

    match kind {
        StatementKind::Select => {
            sql.push("SELECT".to_string());
            if !parts.select_modifiers.is_empty() {
                sql.push(parts.select_modifiers.join(" "));
            }
            if parts.select_columns.is_empty() {
                sql.push("*".to_string());
            } else {
                sql.push(parts.select_columns.join(", "));
            }
            sql.push(format!("FROM {}", parts.table_target));
        }
        StatementKind::Insert | StatementKind::Upsert => {
            sql.push(format!("INSERT INTO {}", parts.insert_target));
        }
        StatementKind::Update => sql.push(format!("UPDATE {}", parts.table_target)),
        StatementKind::Delete => sql.push(format!("DELETE FROM {}", parts.table_target)),
    }

    let set = match kind {
        StatementKind::Insert | StatementKind::Upsert => {
            Assignments::merged(&[&parts.assign_on_insert, &parts.assign])
        }
        StatementKind::Update => Assignments::merged(&[&parts.assign, &parts.assign_on_update]),
        StatementKind::Select | StatementKind::Delete => Assignments::new(),
    };
    if !set.is_empty() {
        sql.push(format!("SET {}", set.to_sql()));
    }

    if kind == StatementKind::Upsert {
        let on_duplicate = Assignments::merged(&[&parts.assign, &parts.assign_on_update]);
        if !on_duplicate.is_empty() {
            sql.push(format!("ON DUPLICATE KEY UPDATE {}", on_duplicate.to_sql()));
        }
    }

    if !parts.where_sql.is_empty() {
        sql.push(format!("WHERE {}", parts.where_sql));
    }

    if !parts.order_by.is_empty() {
        sql.push(format!("ORDER BY {}", parts.order_by.join(", ")));
    }

    if parts.limit >= 0 {
        sql.push(format!("LIMIT {}", parts.limit));
    } else if parts.offset > 0 {
        sql.push(format!("LIMIT {MAX_ROWS}"));
    }
    if parts.offset > 0 {
        sql.push(format!("OFFSET {}", parts.offset));
    }

    sql.join(" ")
}
