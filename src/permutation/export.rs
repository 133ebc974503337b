//! Runtime export of the field space
//!
//! Three record shapes, one per exported field, sorted by field name:
//!
//! ```text
//! [name, 1, detect, [values...]]   variable: several values and a detector
//! [name, 2, value]                 fixed: value known at build time
//! [name, 3, detect, default?]      detect-only: no values, only a detector
//! ```

use serde::Serialize;
use std::fmt;

use super::field::Field;
use super::value::FieldValue;

/// One exported field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportRecord {
    Variable {
        name: String,
        detect: String,
        values: Vec<FieldValue>,
    },
    Fixed {
        name: String,
        value: FieldValue,
    },
    Detect {
        name: String,
        detect: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<FieldValue>,
    },
}

impl ExportRecord {
    /// Record for `field`, or `None` when it has no runtime effect.
    pub fn from_field(field: &Field) -> Option<ExportRecord> {
        let name = field.name().to_string();
        match (field.values(), field.detect()) {
            (Some(values), Some(detect)) if values.len() > 1 => Some(ExportRecord::Variable {
                name,
                detect: detect.to_string(),
                values: default_first(values, field.default()),
            }),
            (Some(values), _) => values.first().map(|value| ExportRecord::Fixed {
                name,
                value: value.clone(),
            }),
            (None, Some(detect)) => Some(ExportRecord::Detect {
                name,
                detect: detect.to_string(),
                default: field.default().cloned(),
            }),
            (None, None) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ExportRecord::Variable { name, .. }
            | ExportRecord::Fixed { name, .. }
            | ExportRecord::Detect { name, .. } => name,
        }
    }

    /// Numeric shape tag used in the runtime form.
    pub fn code(&self) -> u8 {
        match self {
            ExportRecord::Variable { .. } => 1,
            ExportRecord::Fixed { .. } => 2,
            ExportRecord::Detect { .. } => 3,
        }
    }

    /// Compact runtime text, e.g. `['debug',2,false]`.
    pub fn to_js(&self) -> String {
        let mut parts = vec![format!("'{}'", self.name()), self.code().to_string()];
        match self {
            ExportRecord::Variable { detect, values, .. } => {
                let values: Vec<String> = values.iter().map(FieldValue::to_json).collect();
                parts.push(detect.clone());
                parts.push(format!("[{}]", values.join(",")));
            }
            ExportRecord::Fixed { value, .. } => parts.push(value.to_json()),
            ExportRecord::Detect { detect, default, .. } => {
                parts.push(detect.clone());
                if let Some(default) = default {
                    parts.push(default.to_json());
                }
            }
        }
        format!("[{}]", parts.join(","))
    }
}

/// Move the first occurrence of `default` to the front. Lists without the
/// default keep their order.
fn default_first(
    values: &[FieldValue],
    default: Option<&FieldValue>,
) -> Vec<FieldValue> {
    let mut ordered = values.to_vec();
    if let Some(position) = default.and_then(|d| ordered.iter().position(|v| v == d)) {
        let preferred = ordered.remove(position);
        ordered.insert(0, preferred);
    }
    ordered
}

/// All exported records, never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExportTable {
    records: Vec<ExportRecord>,
}

impl ExportTable {
    /// Build from fields already in name order. `None` if nothing qualifies.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a Field>) -> Option<ExportTable> {
        let records: Vec<ExportRecord> = fields.into_iter().filter_map(ExportRecord::from_field).collect();
        if records.is_empty() {
            None
        } else {
            Some(ExportTable { records })
        }
    }

    pub fn records(&self) -> &[ExportRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&ExportRecord> {
        self.records.iter().find(|record| record.name() == name)
    }

    /// `[[...],[...]]` text embedded into generated output.
    pub fn to_js(&self) -> String {
        let records: Vec<String> = self.records.iter().map(ExportRecord::to_js).collect();
        format!("[{}]", records.join(","))
    }
}

impl fmt::Display for ExportTable {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.to_js())
    }
}
