//! Field declarations and value checks

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{ConfigError, ConfigResult};
use super::value::FieldValue;

static FIELD_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$.]*$").expect("field name pattern is valid"));

/// Whether `name` is a valid field name (`core.debug`, `$env`, `locale`).
pub fn is_valid_field_name(name: &str) -> bool {
    FIELD_NAME.is_match(name)
}

/// Check as written in configuration, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckSpec {
    /// `"Boolean"`, `"String"` or `"Number"`
    Named(String),
    /// Explicit value set
    Set(Vec<FieldValue>),
    /// Anything else the configuration contained
    Other(serde_json::Value),
}

impl fmt::Display for CheckSpec {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            CheckSpec::Named(name) => f.write_str(name),
            CheckSpec::Set(values) => {
                let items: Vec<String> = values.iter().map(FieldValue::to_json).collect();
                write!(f, "[{}]", items.join(","))
            }
            CheckSpec::Other(value) => write!(f, "{}", value),
        }
    }
}

/// Validated value domain of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    Boolean,
    String,
    Number,
    OneOf(Vec<FieldValue>),
}

impl Check {
    /// Validate a raw check. Type names are matched case-insensitively; an
    /// empty value set is rejected.
    pub fn parse(
        field: &str,
        spec: &CheckSpec,
    ) -> ConfigResult<Check> {
        let invalid = || ConfigError::InvalidCheck {
            name: field.to_string(),
            check: spec.to_string(),
        };
        match spec {
            CheckSpec::Named(name) => match name.to_ascii_lowercase().as_str() {
                "boolean" => Ok(Check::Boolean),
                "string" => Ok(Check::String),
                "number" => Ok(Check::Number),
                _ => Err(invalid()),
            },
            CheckSpec::Set(values) if !values.is_empty() && !has_repeats(values) => {
                Ok(Check::OneOf(values.clone()))
            }
            CheckSpec::Set(_) | CheckSpec::Other(_) => Err(invalid()),
        }
    }

    /// Type match or set membership.
    pub fn accepts(
        &self,
        value: &FieldValue,
    ) -> bool {
        match self {
            Check::Boolean => matches!(value, FieldValue::Bool(_)),
            Check::String => matches!(value, FieldValue::Str(_)),
            Check::Number => matches!(value, FieldValue::Int(_) | FieldValue::Float(_)),
            Check::OneOf(allowed) => allowed.contains(value),
        }
    }

    /// Values implied by the check alone, if it enumerates them.
    pub fn implied_values(&self) -> Option<Vec<FieldValue>> {
        match self {
            Check::Boolean => Some(vec![FieldValue::Bool(true), FieldValue::Bool(false)]),
            Check::OneOf(values) => Some(values.clone()),
            Check::String | Check::Number => None,
        }
    }
}

// 重复的值会产生同名的排列
fn has_repeats(values: &[FieldValue]) -> bool {
    values
        .iter()
        .enumerate()
        .any(|(i, value)| values[..i].contains(value))
}

/// A field as one scope declares it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<CheckSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
}

impl FieldDecl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(
        mut self,
        check: CheckSpec,
    ) -> Self {
        self.check = Some(check);
        self
    }

    pub fn boolean(self) -> Self {
        self.check(CheckSpec::Named("Boolean".to_string()))
    }

    pub fn one_of(
        self,
        values: impl IntoIterator<Item = impl Into<FieldValue>>,
    ) -> Self {
        self.check(CheckSpec::Set(values.into_iter().map(Into::into).collect()))
    }

    pub fn detect(
        mut self,
        detect: &str,
    ) -> Self {
        self.detect = Some(detect.to_string());
        self
    }

    pub fn default_value(
        mut self,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// A field registered in a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(super) name: String,
    pub(super) scope: String,
    pub(super) check: Option<Check>,
    pub(super) detect: Option<String>,
    pub(super) default: Option<FieldValue>,
    pub(super) values: Option<Vec<FieldValue>>,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scope that declared the field.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn check(&self) -> Option<&Check> {
        self.check.as_ref()
    }

    pub fn detect(&self) -> Option<&str> {
        self.detect.as_deref()
    }

    pub fn default(&self) -> Option<&FieldValue> {
        self.default.as_ref()
    }

    /// Resolved value list, present once the field was pinned or opened.
    pub fn values(&self) -> Option<&[FieldValue]> {
        self.values.as_deref()
    }

    pub(super) fn validate(
        &self,
        value: &FieldValue,
    ) -> ConfigResult<()> {
        match &self.check {
            Some(check) if !check.accepts(value) => Err(ConfigError::InvalidValue {
                name: self.name.clone(),
                value: value.to_json(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names() {
        assert!(is_valid_field_name("debug"));
        assert!(is_valid_field_name("core.locale"));
        assert!(is_valid_field_name("$env_1"));
        assert!(!is_valid_field_name(""));
        assert!(!is_valid_field_name("1st"));
        assert!(!is_valid_field_name("has space"));
        assert!(!is_valid_field_name("a-b"));
    }

    #[test]
    fn test_check_parse_is_case_insensitive() {
        let spec = CheckSpec::Named("boolean".to_string());
        assert_eq!(Check::parse("f", &spec), Ok(Check::Boolean));
        let spec = CheckSpec::Named("NUMBER".to_string());
        assert_eq!(Check::parse("f", &spec), Ok(Check::Number));
    }

    #[test]
    fn test_check_parse_rejects_unknown() {
        let spec = CheckSpec::Named("Date".to_string());
        assert!(matches!(
            Check::parse("f", &spec),
            Err(ConfigError::InvalidCheck { .. })
        ));
        let spec = CheckSpec::Other(serde_json::json!(42));
        assert!(Check::parse("f", &spec).is_err());
        assert!(Check::parse("f", &CheckSpec::Set(vec![])).is_err());
    }

    #[test]
    fn test_check_parse_rejects_repeated_values() {
        let spec = CheckSpec::Set(vec!["x".into(), "y".into(), "x".into()]);
        assert_eq!(
            Check::parse("mode", &spec),
            Err(ConfigError::InvalidCheck {
                name: "mode".to_string(),
                check: spec.to_string(),
            })
        );
        let spec = CheckSpec::Set(vec![1i64.into(), FieldValue::from("1")]);
        assert!(Check::parse("mode", &spec).is_ok());
    }

    #[test]
    fn test_check_accepts() {
        assert!(Check::Boolean.accepts(&FieldValue::Bool(false)));
        assert!(!Check::Boolean.accepts(&FieldValue::from("false")));
        assert!(Check::Number.accepts(&FieldValue::Float(0.5)));
        assert!(Check::Number.accepts(&FieldValue::Int(5)));
        assert!(!Check::String.accepts(&FieldValue::Int(5)));

        let set = Check::OneOf(vec![FieldValue::from("en"), FieldValue::from("de")]);
        assert!(set.accepts(&FieldValue::from("de")));
        assert!(!set.accepts(&FieldValue::from("fr")));
    }

    #[test]
    fn test_check_spec_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            check: CheckSpec,
        }
        let named: Holder = toml::from_str(r#"check = "String""#).unwrap();
        assert_eq!(named.check, CheckSpec::Named("String".to_string()));
        let set: Holder = toml::from_str(r#"check = ["a", "b"]"#).unwrap();
        assert_eq!(set.check, CheckSpec::Set(vec!["a".into(), "b".into()]));
        let other: Holder = toml::from_str("check = 3").unwrap();
        assert!(matches!(other.check, CheckSpec::Other(_)));
    }
}
