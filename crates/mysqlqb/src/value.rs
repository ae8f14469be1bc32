//! Scalar values bound to statement parameters.

use crate::error::{QbError, QbResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bindable SQL scalar.
///
/// This is the complete set of values a parameter or filter literal can carry.
/// Anything else has to be converted by the caller first (dates become strings,
/// JSON arrays/objects are rejected by `TryFrom<serde_json::Value>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// NULL
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float
    Double(f64),
    /// Text
    String(String),
}

impl Value {
    /// Check if this value is NULL.
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the variant, for error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Double(_) => "double",
            Value::String(_) => "string",
        }
    }

    /// Borrow the text if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Double(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// Dates travel as MySQL DATETIME/DATE literals.

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::String(v.format("%Y-%m-%d %H:%M:%S%.f").to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::String(v.format("%Y-%m-%d").to_string())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(v: DateTime<Tz>) -> Self {
        Value::from(v.naive_utc())
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = QbError;

    fn try_from(v: serde_json::Value) -> QbResult<Self> {
        match v {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Double(f))
                } else {
                    Err(QbError::unsupported_type(format!("number {n} is out of range")))
                }
            }
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Array(_) => Err(QbError::unsupported_type("array")),
            serde_json::Value::Object(_) => Err(QbError::unsupported_type("object")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_conversions() {
        assert_eq!(Value::from(7i32), Value::Int(7));
        assert_eq!(Value::from(7u32), Value::Int(7));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(1.5f64), Value::Double(1.5));
        assert_eq!(Value::from("a"), Value::String("a".to_string()));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".to_string()));
    }

    #[test]
    fn chrono_values_render_as_mysql_literals() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(Value::from(date), Value::from("2024-01-02"));

        let dt = date.and_hms_opt(3, 4, 5).unwrap();
        assert_eq!(Value::from(dt), Value::from("2024-01-02 03:04:05"));
    }

    #[test]
    fn json_scalars_convert_and_containers_fail() {
        assert_eq!(Value::try_from(serde_json::json!(3)).unwrap(), Value::Int(3));
        assert_eq!(Value::try_from(serde_json::json!(0.5)).unwrap(), Value::Double(0.5));
        assert_eq!(Value::try_from(serde_json::json!(null)).unwrap(), Value::Null);

        let err = Value::try_from(serde_json::json!([1, 2])).unwrap_err();
        assert!(matches!(err, QbError::UnsupportedType(_)));
        let err = Value::try_from(serde_json::json!({"a": 1})).unwrap_err();
        assert!(matches!(err, QbError::UnsupportedType(_)));
    }

    #[test]
    fn untagged_deserialize() {
        let v: Vec<Value> = serde_json::from_str(r#"[null, true, 1, 2.5, "s"]"#).unwrap();
        assert_eq!(
            v,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Int(1),
                Value::Double(2.5),
                Value::from("s"),
            ]
        );
    }
}
