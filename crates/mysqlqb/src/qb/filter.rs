//! Declarative WHERE filters and their compiler.
//!
//! A filter is a tree of [`FilterNode`]s. [`FilterCompiler`] lowers it into a SQL
//! boolean expression, registering one `:p_<n>` parameter per literal it meets.
//!
//! Every AND/OR group is wrapped in exactly one pair of parentheses, so operator
//! precedence is always explicit in the output:
//!
//! ```ignore
//! use mysqlqb::{FilterNode, qb::ParamList, qb::FilterCompiler};
//!
//! let node = FilterNode::and(vec![
//!     FilterNode::eq("status", "active"),
//!     FilterNode::or(vec![FilterNode::gt("age", 18), FilterNode::lt("age", 5)]),
//! ]);
//! let mut params = ParamList::new();
//! let sql = FilterCompiler::new(&mut params, None).compile(&node);
//! assert_eq!(sql, "(status = :p_0 and (age > :p_1 or age < :p_2))");
//! ```

use crate::ident::field_name;
use crate::qb::param::ParamList;
use crate::value::Value;
use std::fmt;

/// Predicate that never matches. Used for filter shapes that cannot match anything.
pub const ALWAYS_FALSE: &str = "1 = 0";

/// Comparison operator of a [`FilterNode::Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Like,
    NotLike,
}

impl CompareOp {
    /// SQL spelling of the operator.
    pub const fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Equal => "=",
            CompareOp::NotEqual => "!=",
            CompareOp::Less => "<",
            CompareOp::LessOrEqual => "<=",
            CompareOp::Greater => ">",
            CompareOp::GreaterOrEqual => ">=",
            CompareOp::Like => "like",
            CompareOp::NotLike => "not like",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Filter tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    /// All children must match.
    And(Vec<FilterNode>),

    /// At least one child must match.
    Or(Vec<FilterNode>),

    /// `key op value`. A `Value::Null` turns `=`/`!=` into `is null`/`is not null`.
    Compare {
        key: String,
        op: CompareOp,
        value: Value,
    },

    /// `key in (values...)`. An empty list never matches.
    In { key: String, values: Vec<Value> },
}

impl FilterNode {
    /// Create an AND group.
    pub fn and(children: Vec<FilterNode>) -> Self {
        FilterNode::And(children)
    }

    /// Create an OR group.
    pub fn or(children: Vec<FilterNode>) -> Self {
        FilterNode::Or(children)
    }

    /// Create a comparison node.
    pub fn compare(key: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        FilterNode::Compare {
            key: key.into(),
            op,
            value: value.into(),
        }
    }

    /// key = value
    pub fn eq(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(key, CompareOp::Equal, value)
    }

    /// key != value
    pub fn ne(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(key, CompareOp::NotEqual, value)
    }

    /// key > value
    pub fn gt(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(key, CompareOp::Greater, value)
    }

    /// key >= value
    pub fn gte(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(key, CompareOp::GreaterOrEqual, value)
    }

    /// key < value
    pub fn lt(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(key, CompareOp::Less, value)
    }

    /// key <= value
    pub fn lte(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(key, CompareOp::LessOrEqual, value)
    }

    /// key like pattern
    pub fn like(key: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::compare(key, CompareOp::Like, pattern)
    }

    /// key not like pattern
    pub fn not_like(key: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::compare(key, CompareOp::NotLike, pattern)
    }

    /// key is null
    pub fn is_null(key: impl Into<String>) -> Self {
        Self::compare(key, CompareOp::Equal, Value::Null)
    }

    /// key is not null
    pub fn is_not_null(key: impl Into<String>) -> Self {
        Self::compare(key, CompareOp::NotEqual, Value::Null)
    }

    /// key in (values...)
    pub fn in_list<T: Into<Value>>(key: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self {
        FilterNode::In {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Lowers [`FilterNode`] trees into SQL, binding literals into a [`ParamList`].
pub struct FilterCompiler<'a> {
    params: &'a mut ParamList,
    alias: Option<&'a str>,
}

impl<'a> FilterCompiler<'a> {
    /// Create a compiler writing into `params`, qualifying bare column names with `alias`.
    pub fn new(params: &'a mut ParamList, alias: Option<&'a str>) -> Self {
        Self { params, alias }
    }

    /// Compile a list of top-level nodes, joined with `and`.
    ///
    /// Returns an empty string when nothing compiles to a predicate, which the builder
    /// treats as "no WHERE clause".
    pub fn compile_all(&mut self, nodes: &[FilterNode]) -> String {
        self.compile_children(nodes).join(" and ")
    }

    /// Compile one node.
    pub fn compile(&mut self, node: &FilterNode) -> String {
        match node {
            FilterNode::And(children) => self.compile_group(children, " and "),
            FilterNode::Or(children) => self.compile_group(children, " or "),
            FilterNode::Compare { key, op, value } => {
                if value.is_null() {
                    // Ordering against NULL can never be true; degrade to a no-match.
                    return match op {
                        CompareOp::Equal => format!("{} is null", self.field(key)),
                        CompareOp::NotEqual => format!("{} is not null", self.field(key)),
                        _ => ALWAYS_FALSE.to_string(),
                    };
                }
                let placeholder = self.params.bind(value.clone());
                format!("{} {} {}", self.field(key), op, placeholder)
            }
            FilterNode::In { key, values } => {
                if values.is_empty() {
                    return ALWAYS_FALSE.to_string();
                }
                let placeholders: Vec<String> = values
                    .iter()
                    .map(|v| self.params.bind(v.clone()))
                    .collect();
                format!("{} in ({})", self.field(key), placeholders.join(", "))
            }
        }
    }

    fn compile_group(&mut self, children: &[FilterNode], sep: &str) -> String {
        let parts = self.compile_children(children);
        if parts.is_empty() {
            return String::new();
        }
        format!("({})", parts.join(sep))
    }

    fn compile_children(&mut self, children: &[FilterNode]) -> Vec<String> {
        children
            .iter()
            .map(|child| self.compile(child))
            .filter(|sql| !sql.is_empty())
            .collect()
    }

    fn field(&self, key: &str) -> String {
        field_name(key, self.alias)
    }
}
