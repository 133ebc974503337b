//! Field configuration error types

use thiserror::Error;

/// Errors raised while declaring, pinning or opening fields.
///
/// All of them abort the declaration step that triggered them; the session
/// is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Field declared by more than one scope
    #[error("Field '{name}' was already defined (redeclared by '{scope}')")]
    DuplicateField { name: String, scope: String },

    /// Check is not Boolean, String, Number or a value list
    #[error("Unsupported check '{check}' for field '{name}'")]
    InvalidCheck { name: String, check: String },

    /// Detect reference does not name a known detector
    #[error("Field '{name}' uses unknown detection class '{detect}'")]
    UnknownDetect { name: String, detect: String },

    /// Field was never declared by any scope
    #[error("Unsupported field (not defined by any project): {0}")]
    UnknownField(String),

    /// Value rejected by the field's check
    #[error("Unsupported value {value} for field '{name}'")]
    InvalidValue { name: String, value: String },

    /// No value list can be derived for the field
    #[error("Could not permutate field '{0}': requires a value list for non-boolean fields without a default")]
    NotPermutable(String),

    /// Name outside the allowed identifier alphabet
    #[error("Invalid field name '{0}'")]
    InvalidFieldName(String),
}

/// Result type for field configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_field_error() {
        let err = ConfigError::DuplicateField {
            name: "debug".to_string(),
            scope: "app".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("debug"));
        assert!(message.contains("app"));
    }

    #[test]
    fn test_not_permutable_error() {
        let err = ConfigError::NotPermutable("locale".to_string());
        assert!(err.to_string().contains("locale"));
    }
}
