//! Human-readable rendering with parameter values inlined.
//!
//! The output is for logs and error messages only. It is never sent to the server.

use crate::escape::ValueEscaper;
use crate::qb::param::ParamList;
use crate::value::Value;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Greedy digits: `:p_1` never matches the prefix of `:p_10`.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(p_\d+)").expect("placeholder pattern is valid"));

/// Replace every known `:p_<n>` placeholder in `sql` with its value as a literal.
///
/// `Null` becomes `null`, the empty string becomes `''`, everything else goes through
/// `escaper`. Placeholders without a registered value are left untouched.
///
/// Matching is textual: `:p_<n>` inside a string literal of a raw fragment
/// (`where_raw`, `set_raw`) is replaced too. Only this rendering is affected; the
/// executed statement and its bindings are not.
pub fn render_debug_sql(sql: &str, params: &ParamList, escaper: &dyn ValueEscaper) -> String {
    PLACEHOLDER
        .replace_all(sql, |caps: &Captures<'_>| match params.get(&caps[1]) {
            Some(Value::Null) => "null".to_string(),
            Some(Value::String(s)) if s.is_empty() => "''".to_string(),
            Some(value) => escaper.escape(value),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::MySqlEscaper;

    #[test]
    fn inlines_values_by_name() {
        let mut params = ParamList::new();
        let mut sql = String::from("SELECT * FROM t WHERE");
        for i in 0..11 {
            let ph = params.bind(i);
            sql.push_str(&format!(" c{i} = {ph}"));
        }
        let out = render_debug_sql(&sql, &params, &MySqlEscaper);
        assert!(out.ends_with("c1 = 1 c2 = 2 c3 = 3 c4 = 4 c5 = 5 c6 = 6 c7 = 7 c8 = 8 c9 = 9 c10 = 10"));
        assert!(!out.contains(":p_"));
    }

    #[test]
    fn null_and_empty_string() {
        let mut params = ParamList::new();
        let a = params.bind(Value::Null);
        let b = params.bind("");
        let c = params.bind("it's");
        let sql = format!("{a} {b} {c}");
        assert_eq!(render_debug_sql(&sql, &params, &MySqlEscaper), "null '' 'it''s'");
    }

    #[test]
    fn placeholder_text_in_raw_literal_is_also_inlined() {
        let mut params = ParamList::new();
        let ph = params.bind(5);
        let sql = format!("SELECT * FROM t WHERE note = ':p_0 literal' AND id = {ph}");
        assert_eq!(
            render_debug_sql(&sql, &params, &MySqlEscaper),
            "SELECT * FROM t WHERE note = '5 literal' AND id = 5"
        );
    }

    #[test]
    fn unknown_placeholder_kept() {
        let params = ParamList::new();
        assert_eq!(render_debug_sql("x = :p_7", &params, &MySqlEscaper), "x = :p_7");
    }
}
