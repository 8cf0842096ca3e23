use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// A single dynamically typed value of a change row.
///
/// Change events arrive decoded from the wire format with a small set of scalar
/// types plus JSON for nested source values. Cells are compared by value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
    TimestampTz(DateTime<Utc>),
    Json(serde_json::Value),
}

impl Cell {
    /// Returns the string content when the cell holds a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the canonical string rendering used for destination name templating.
    ///
    /// Null renders as the empty string so that templates referencing a nullable
    /// field still produce a usable identifier fragment.
    pub fn to_template_value(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Bool(value) => value.to_string(),
            Cell::I64(value) => value.to_string(),
            Cell::F64(value) => value.to_string(),
            Cell::String(value) => value.clone(),
            Cell::TimestampTz(value) => value.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Cell::Json(value) => value.to_string(),
        }
    }
}

impl fmt::Display for Cell {
    /// Renders the cell for row logging, quoting strings to keep field
    /// boundaries unambiguous.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("null"),
            Cell::Bool(value) => write!(f, "{value}"),
            Cell::I64(value) => write!(f, "{value}"),
            Cell::F64(value) => write!(f, "{value}"),
            Cell::String(value) => write!(f, "{value:?}"),
            Cell::TimestampTz(value) => {
                write!(f, "{:?}", value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Cell::Json(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::String(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::String(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::I64(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_value_renders_scalars() {
        assert_eq!(Cell::Null.to_template_value(), "");
        assert_eq!(Cell::Bool(true).to_template_value(), "true");
        assert_eq!(Cell::I64(42).to_template_value(), "42");
        assert_eq!(Cell::from("demo").to_template_value(), "demo");
    }

    #[test]
    fn template_value_renders_json_compactly() {
        let cell = Cell::Json(serde_json::json!({"a": 1}));

        assert_eq!(cell.to_template_value(), r#"{"a":1}"#);
    }
}
