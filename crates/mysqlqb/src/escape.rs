//! SQL literal rendering of [`Value`]s.
//!
//! Only the debug renderer uses this. Executed statements always bind values as
//! parameters.

use crate::value::Value;

/// Renders a value as a SQL literal.
pub trait ValueEscaper {
    fn escape(&self, value: &Value) -> String;
}

/// MySQL text-protocol literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlEscaper;

impl ValueEscaper for MySqlEscaper {
    fn escape(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            Value::Int(i) => i.to_string(),
            // MySQL has no NaN/infinity literals.
            Value::Double(d) if !d.is_finite() => "NULL".to_string(),
            Value::Double(d) => d.to_string(),
            Value::String(s) => escape_string(s),
        }
    }
}

/// Quote and escape a string for the MySQL text protocol.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x1a' => out.push_str("\\Z"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_scalars() {
        let e = MySqlEscaper;
        assert_eq!(e.escape(&Value::Int(-3)), "-3");
        assert_eq!(e.escape(&Value::Double(1.5)), "1.5");
        assert_eq!(e.escape(&Value::Double(f64::NAN)), "NULL");
        assert_eq!(e.escape(&Value::Bool(false)), "FALSE");
        assert_eq!(e.escape(&Value::Null), "NULL");
    }

    #[test]
    fn escapes_strings() {
        assert_eq!(escape_string("plain"), "'plain'");
        assert_eq!(escape_string("O'Brien"), "'O''Brien'");
        assert_eq!(escape_string("a\\b\nc"), "'a\\\\b\\nc'");
    }
}
