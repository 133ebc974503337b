//! One concrete build variant

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::checksum::Hasher;
use super::value::FieldValue;

/// Length of the short identity hash used in artifact names.
pub const HASH_LEN: usize = 16;

/// Immutable name → value mapping for one build variant.
///
/// Entries are kept sorted by field name, so the key, the checksum and the
/// display form never depend on insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permutation {
    values: BTreeMap<String, FieldValue>,
    #[serde(skip)]
    checksum: OnceCell<String>,
}

impl Permutation {
    pub fn new(values: BTreeMap<String, FieldValue>) -> Self {
        Permutation {
            values,
            checksum: OnceCell::new(),
        }
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn has(
        &self,
        name: &str,
    ) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Canonical text key: `name:json;name:json`.
    pub fn key(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{}:{}", name, value.to_json()))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Full SHA-256 hex digest over the sorted (name, value) pairs.
    pub fn checksum(&self) -> &str {
        self.checksum.get_or_init(|| {
            let mut hasher = Hasher::new();
            for (name, value) in self.iter() {
                hasher.field(name.as_bytes());
                hasher.field(value.to_json().as_bytes());
            }
            hasher.finish_hex()
        })
    }

    /// Short identity hash used to name artifacts.
    pub fn hash(&self) -> &str {
        &self.checksum()[..HASH_LEN]
    }

    /// Restrict to the given fields; names the permutation lacks are skipped.
    pub fn filter<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Permutation {
        let values = names
            .into_iter()
            .filter_map(|name| {
                self.values
                    .get_key_value(name)
                    .map(|(k, v)| (k.clone(), v.clone()))
            })
            .collect();
        Permutation::new(values)
    }
}

impl PartialEq for Permutation {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.values == other.values
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Permutation {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Permutation::new(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Permutation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (position, (name, value)) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}
