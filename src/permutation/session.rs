//! Field registry and permutation enumeration

use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info};

use super::combination::Permutation;
use super::context::PermutationContext;
use super::error::{ConfigError, ConfigResult};
use super::export::ExportTable;
use super::field::{is_valid_field_name, Check, Field, FieldDecl};
use super::value::FieldValue;

/// Field declarations contributed by one project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    name: String,
    detectors: Vec<String>,
    fields: IndexMap<String, FieldDecl>,
}

impl Scope {
    pub fn new(name: impl Into<String>) -> Self {
        Scope {
            name: name.into(),
            ..Scope::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a detection routine this scope provides.
    pub fn add_detector(
        &mut self,
        detector: impl Into<String>,
    ) -> &mut Self {
        self.detectors.push(detector.into());
        self
    }

    /// Declare a field. A second declaration of the same name inside one
    /// scope replaces the first.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        decl: FieldDecl,
    ) -> &mut Self {
        self.fields.insert(name.into(), decl);
        self
    }

    pub fn detectors(&self) -> &[String] {
        &self.detectors
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDecl)> {
        self.fields.iter().map(|(name, decl)| (name.as_str(), decl))
    }
}

/// Build session: the registered fields and the detectors they may use.
///
/// Fields are stored by name in sorted order, which is the order both
/// enumeration and export require.
#[derive(Debug, Clone, Default)]
pub struct Session {
    scopes: Vec<String>,
    detectors: BTreeSet<String>,
    fields: BTreeMap<String, Field>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a detection routine not tied to any scope.
    pub fn add_detector(
        &mut self,
        detector: impl Into<String>,
    ) {
        self.detectors.insert(detector.into());
    }

    pub fn is_known_detector(
        &self,
        detector: &str,
    ) -> bool {
        self.detectors.contains(detector)
    }

    /// Add one scope's declarations. Scopes must be added in priority order.
    ///
    /// Either every field of the scope is registered or, on error, none is.
    pub fn add_scope(
        &mut self,
        scope: &Scope,
    ) -> ConfigResult<()> {
        debug!("Adding scope '{}' with {} fields", scope.name(), scope.fields.len());

        let mut detectors = self.detectors.clone();
        detectors.extend(scope.detectors.iter().cloned());

        let mut staged = Vec::with_capacity(scope.fields.len());
        for (name, decl) in scope.fields() {
            if self.fields.contains_key(name) {
                return Err(ConfigError::DuplicateField {
                    name: name.to_string(),
                    scope: scope.name().to_string(),
                });
            }
            if !is_valid_field_name(name) {
                return Err(ConfigError::InvalidFieldName(name.to_string()));
            }

            let check = decl
                .check
                .as_ref()
                .map(|spec| Check::parse(name, spec))
                .transpose()?;

            if let Some(detect) = &decl.detect {
                if !detectors.contains(detect) {
                    return Err(ConfigError::UnknownDetect {
                        name: name.to_string(),
                        detect: detect.clone(),
                    });
                }
            }

            let field = Field {
                name: name.to_string(),
                scope: scope.name().to_string(),
                check,
                detect: decl.detect.clone(),
                default: decl.default.clone(),
                values: None,
            };
            if let Some(default) = &field.default {
                field.validate(default)?;
            }
            staged.push(field);
        }

        self.detectors = detectors;
        self.scopes.push(scope.name().to_string());
        for field in staged {
            self.fields.insert(field.name.clone(), field);
        }
        Ok(())
    }

    /// Names of the scopes added so far, in priority order.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn field(
        &self,
        name: &str,
    ) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Registered fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    fn field_mut(
        &mut self,
        name: &str,
    ) -> ConfigResult<&mut Field> {
        self.fields
            .get_mut(name)
            .ok_or_else(|| ConfigError::UnknownField(name.to_string()))
    }

    /// Pin a field to one value: the value list becomes `[value]`, the
    /// default becomes `value` and any detector is dropped.
    pub fn set_field(
        &mut self,
        name: &str,
        value: FieldValue,
    ) -> ConfigResult<()> {
        let field = self.field_mut(name)?;
        field.validate(&value)?;

        debug!("Pinning field {} to {}", name, value);
        field.values = Some(vec![value.clone()]);
        field.default = Some(value);
        field.detect = None;
        Ok(())
    }

    /// Open a field for variance.
    ///
    /// Explicit values are validated against the check and used as given.
    /// Without explicit values the list comes from the check (`[true, false]`
    /// for booleans, the set for value sets) or else from the default.
    pub fn permutate_field(
        &mut self,
        name: &str,
        values: Option<Vec<FieldValue>>,
        detect: Option<&str>,
        default: Option<FieldValue>,
    ) -> ConfigResult<()> {
        if let Some(detect) = detect {
            if !self.is_known_detector(detect) {
                return Err(ConfigError::UnknownDetect {
                    name: name.to_string(),
                    detect: detect.to_string(),
                });
            }
        }

        let field = self.field_mut(name)?;
        if let Some(default) = &default {
            field.validate(default)?;
        }

        let resolved = match values.filter(|values| !values.is_empty()) {
            Some(values) => {
                for value in &values {
                    field.validate(value)?;
                }
                values
            }
            None => {
                let effective_default = default.as_ref().or(field.default.as_ref());
                match field.check.as_ref().and_then(Check::implied_values) {
                    Some(implied) => implied,
                    None => match effective_default {
                        Some(default) => vec![default.clone()],
                        None => return Err(ConfigError::NotPermutable(name.to_string())),
                    },
                }
            }
        };

        debug!("Opening field {} with {} values", name, resolved.len());
        field.values = Some(resolved);
        if default.is_some() {
            field.default = default;
        }
        if let Some(detect) = detect {
            field.detect = Some(detect.to_string());
        }
        Ok(())
    }

    /// Every combination of the resolved value lists.
    ///
    /// Fields are taken in name order and the last field varies fastest.
    /// With no resolved field at all the result is empty.
    pub fn permutations(&self) -> Vec<Permutation> {
        let axes: Vec<(&str, &[FieldValue])> = self
            .fields
            .values()
            .filter_map(|field| field.values().map(|values| (field.name(), values)))
            .collect();
        if axes.is_empty() || axes.iter().any(|(_, values)| values.is_empty()) {
            return Vec::new();
        }

        let total: usize = axes.iter().map(|(_, values)| values.len()).product();
        let mut result = Vec::with_capacity(total);
        let mut cursor = vec![0usize; axes.len()];

        loop {
            let combination = axes
                .iter()
                .zip(&cursor)
                .map(|((name, values), &i)| (name.to_string(), values[i].clone()))
                .collect();
            result.push(Permutation::new(combination));

            // 里程表式进位，最右侧字段变化最快
            let mut axis = axes.len();
            loop {
                if axis == 0 {
                    return result;
                }
                axis -= 1;
                cursor[axis] += 1;
                if cursor[axis] < axes[axis].1.len() {
                    break;
                }
                cursor[axis] = 0;
            }
        }
    }

    /// Walk all permutations, keeping each one current on this thread while
    /// `step` runs. Stops at the first error.
    pub fn permutate<E>(
        &self,
        mut step: impl FnMut(&Arc<Permutation>) -> Result<(), E>,
    ) -> Result<usize, E> {
        info!("Processing permutations...");
        let permutations = self.permutations();
        let length = permutations.len();

        for (position, permutation) in permutations.into_iter().enumerate() {
            info!("Permutation {}/{}: {}", position + 1, length, permutation);
            let permutation = Arc::new(permutation);
            let _guard = PermutationContext::enter(Arc::clone(&permutation));
            step(&permutation)?;
        }
        Ok(length)
    }

    /// Compact description of all fields relevant at runtime.
    ///
    /// `None` means no field qualifies for export.
    pub fn export_fields(&self) -> Option<ExportTable> {
        let table = ExportTable::from_fields(self.fields.values());
        match &table {
            Some(table) => debug!("Exporting {} fields", table.len()),
            None => info!("No exportable fields"),
        }
        table
    }
}
