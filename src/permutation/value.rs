//! Field values

use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete value a field can take.
///
/// Values come from configuration files (TOML or JSON) and are rendered back
/// as JSON in permutation keys and exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl FieldValue {
    /// JSON text of the value (`true`, `3`, `"en"`).
    pub fn to_json(&self) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(n) => n.to_string(),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(|n| n.to_string())
                .unwrap_or_else(|| String::from("null")),
            FieldValue::Str(s) => {
                serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
            }
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "Boolean",
            FieldValue::Int(_) | FieldValue::Float(_) => "Number",
            FieldValue::Str(_) => "String",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json() {
        assert_eq!(FieldValue::Bool(true).to_json(), "true");
        assert_eq!(FieldValue::Int(-3).to_json(), "-3");
        assert_eq!(FieldValue::Float(1.5).to_json(), "1.5");
        assert_eq!(FieldValue::from("en").to_json(), "\"en\"");
        assert_eq!(FieldValue::from("a\"b").to_json(), r#""a\"b""#);
    }

    #[test]
    fn test_untagged_deserialize() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[true, 2, 2.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Bool(true),
                FieldValue::Int(2),
                FieldValue::Float(2.5),
                FieldValue::from("x"),
            ]
        );
    }

    #[test]
    fn test_type_name() {
        assert_eq!(FieldValue::Int(1).type_name(), "Number");
        assert_eq!(FieldValue::Float(1.0).type_name(), "Number");
        assert_eq!(FieldValue::from("s").type_name(), "String");
    }
}
