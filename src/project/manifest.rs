//! kiln.toml manifest parsing and writing

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::permutation::{ConfigResult, FieldDecl, FieldValue, Scope, Session};
use crate::project::error::{ProjectError, ProjectResult};

/// The manifest file name
pub const MANIFEST_FILE: &str = "kiln.toml";

/// Artifact prefix used when `[build]` names none
pub const DEFAULT_PREFIX: &str = "main";

/// Represents the `[project]` section of kiln.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project name, also the scope name of its fields
    pub name: String,
    /// Detection routines this project provides
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detectors: Vec<String>,
    /// Contributing projects, relative to this manifest's directory
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<PathBuf>,
}

/// One `[build.permutate.<field>]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermutateSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<FieldValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detect: Option<String>,
}

/// Represents the `[build]` section of kiln.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSection {
    /// Artifact prefix, artifacts are named `<prefix>-<hash>`
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Optimizer passes per unit
    #[serde(default = "default_passes")]
    pub passes: usize,
    /// Pinned fields
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub set: IndexMap<String, FieldValue>,
    /// Opened fields
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub permutate: IndexMap<String, PermutateSpec>,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_passes() -> usize {
    1
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            passes: default_passes(),
            set: IndexMap::new(),
            permutate: IndexMap::new(),
        }
    }
}

impl BuildSection {
    /// Pin every `set` field, then open every `permutate` field.
    pub fn apply(
        &self,
        session: &mut Session,
    ) -> ConfigResult<()> {
        for (name, value) in &self.set {
            session.set_field(name, value.clone())?;
        }
        for (name, spec) in &self.permutate {
            session.permutate_field(
                name,
                spec.values.clone(),
                spec.detect.as_deref(),
                spec.default.clone(),
            )?;
        }
        Ok(())
    }
}

/// Represents the complete kiln.toml manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// Project metadata
    pub project: ProjectInfo,
    /// Field declarations, in declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub fields: IndexMap<String, FieldDecl>,
    /// Build settings; only the root project's are applied
    #[serde(default)]
    pub build: BuildSection,
}

impl ProjectManifest {
    /// Create a new manifest with the given project name
    pub fn new(name: &str) -> Self {
        ProjectManifest {
            project: ProjectInfo {
                name: name.to_string(),
                detectors: Vec::new(),
                include: Vec::new(),
            },
            fields: IndexMap::new(),
            build: BuildSection::default(),
        }
    }

    /// Load manifest from a directory containing kiln.toml
    pub fn load(dir: &Path) -> ProjectResult<Self> {
        let path = dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(ProjectError::NotProject(dir.to_path_buf()));
        }
        let content = std::fs::read_to_string(&path)?;
        let manifest: ProjectManifest = toml::from_str(&content)?;
        Ok(manifest)
    }

    /// Save manifest to a directory
    pub fn save(
        &self,
        dir: &Path,
    ) -> ProjectResult<()> {
        let path = dir.join(MANIFEST_FILE);
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Declare a field
    pub fn declare(
        &mut self,
        name: &str,
        decl: FieldDecl,
    ) {
        self.fields.insert(name.to_string(), decl);
    }

    /// The scope this project contributes to a session
    pub fn scope(&self) -> Scope {
        let mut scope = Scope::new(self.project.name.as_str());
        for detector in &self.project.detectors {
            scope.add_detector(detector.as_str());
        }
        for (name, decl) in &self.fields {
            scope.declare(name.as_str(), decl.clone());
        }
        scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::CheckSpec;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[project]
name = "app"
detectors = ["core.detect.Locale"]

[fields.debug]
check = "Boolean"
default = false

[fields.locale]
check = ["en", "de", "fr"]
detect = "core.detect.Locale"

[build]
prefix = "site"

[build.set]
debug = true

[build.permutate.locale]
values = ["en", "de"]
default = "de"
"#;

    #[test]
    fn test_new_manifest() {
        let manifest = ProjectManifest::new("app");
        assert_eq!(manifest.project.name, "app");
        assert!(manifest.fields.is_empty());
        assert_eq!(manifest.build.prefix, DEFAULT_PREFIX);
        assert_eq!(manifest.build.passes, 1);
    }

    #[test]
    fn test_parse_sample() {
        let manifest: ProjectManifest = toml::from_str(SAMPLE).unwrap();
        assert_eq!(manifest.project.detectors, vec!["core.detect.Locale"]);

        let names: Vec<&str> = manifest.fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["debug", "locale"]);
        assert_eq!(
            manifest.fields["locale"].check,
            Some(CheckSpec::Set(vec!["en".into(), "de".into(), "fr".into()]))
        );

        assert_eq!(manifest.build.prefix, "site");
        assert_eq!(manifest.build.set["debug"], FieldValue::Bool(true));
        assert_eq!(
            manifest.build.permutate["locale"].values,
            Some(vec!["en".into(), "de".into()])
        );
    }

    #[test]
    fn test_scope_and_apply() {
        let manifest: ProjectManifest = toml::from_str(SAMPLE).unwrap();
        let mut session = Session::new();
        session.add_scope(&manifest.scope()).unwrap();
        manifest.build.apply(&mut session).unwrap();

        let keys: Vec<String> = session.permutations().iter().map(|p| p.key()).collect();
        assert_eq!(keys, vec![r#"debug:true;locale:"en""#, r#"debug:true;locale:"de""#]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut manifest = ProjectManifest::new("app");
        manifest.declare("debug", FieldDecl::new().boolean().default_value(false));
        manifest.build.set.insert("debug".to_string(), true.into());
        manifest.save(dir.path()).unwrap();

        let loaded = ProjectManifest::load(dir.path()).unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn test_load_not_project() {
        let dir = TempDir::new().unwrap();
        let result = ProjectManifest::load(dir.path());
        assert!(matches!(result, Err(ProjectError::NotProject(_))));
    }

    #[test]
    fn test_parse_minimal() {
        let manifest: ProjectManifest = toml::from_str("[project]\nname = \"lib\"\n").unwrap();
        assert!(manifest.project.include.is_empty());
        assert_eq!(manifest.build, BuildSection::default());
    }
}
