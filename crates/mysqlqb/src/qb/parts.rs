//! Clause fragments of a statement under construction.

/// Insertion-ordered `column = expression` list.
///
/// Assigning a column that is already present replaces its expression in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignments {
    entries: Vec<(String, String)>,
}

impl Assignments {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column` to `expr`, overwriting any earlier expression for the same column.
    pub fn insert(&mut self, column: impl Into<String>, expr: impl Into<String>) {
        let column = column.into();
        let expr = expr.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = expr,
            None => self.entries.push((column, expr)),
        }
    }

    /// Expression assigned to `column`, if any.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, e)| e.as_str())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, e)| (c.as_str(), e.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge several lists in order; later lists win on column collision.
    pub fn merged(lists: &[&Assignments]) -> Assignments {
        let mut out = Assignments::new();
        for list in lists {
            for (c, e) in list.iter() {
                out.insert(c, e);
            }
        }
        out
    }

    /// Render as `a = x, b = y`.
    pub fn to_sql(&self) -> String {
        self.iter()
            .map(|(c, e)| format!("{c} = {e}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Every clause fragment of one statement.
///
/// Absence of a clause is represented by emptiness: an empty `where_sql`, an empty
/// `order_by`, a negative `limit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParts {
    /// Keywords between `SELECT` and the column list, in insertion order, no duplicates.
    pub select_modifiers: Vec<String>,
    pub select_columns: Vec<String>,
    pub assign: Assignments,
    pub assign_on_insert: Assignments,
    pub assign_on_update: Assignments,
    pub order_by: Vec<String>,
    pub where_sql: String,
    /// Target of SELECT/UPDATE/DELETE, alias included (`users u`).
    pub table_target: String,
    /// Target of INSERT, never aliased.
    pub insert_target: String,
    /// Rows to skip; 0 means no OFFSET clause.
    pub offset: i64,
    /// Row cap; negative means no LIMIT clause.
    pub limit: i64,
}

impl Default for QueryParts {
    fn default() -> Self {
        Self {
            select_modifiers: Vec::new(),
            select_columns: Vec::new(),
            assign: Assignments::new(),
            assign_on_insert: Assignments::new(),
            assign_on_update: Assignments::new(),
            order_by: Vec::new(),
            where_sql: String::new(),
            table_target: String::new(),
            insert_target: String::new(),
            offset: 0,
            limit: -1,
        }
    }
}

impl QueryParts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `keyword` is among the select modifiers.
    pub fn has_modifier(&self, keyword: &str) -> bool {
        self.select_modifiers.iter().any(|m| m == keyword)
    }

    /// Add or remove a select modifier, keeping the set free of duplicates.
    pub fn toggle_modifier(&mut self, keyword: &str, on: bool) {
        if on {
            if !self.has_modifier(keyword) {
                self.select_modifiers.push(keyword.to_string());
            }
        } else {
            self.select_modifiers.retain(|m| m != keyword);
        }
    }
}
