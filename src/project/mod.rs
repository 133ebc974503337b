//! Project loading
//!
//! A project is a directory with a `kiln.toml`. Projects may include other
//! projects; includes are loaded first so that every project's fields land in
//! the session after the fields of the projects it builds on.

pub mod error;
pub mod manifest;

pub use error::{ProjectError, ProjectResult};
pub use manifest::{BuildSection, PermutateSpec, ProjectInfo, ProjectManifest, MANIFEST_FILE};

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::permutation::Session;

/// One loaded project.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub manifest: ProjectManifest,
}

/// The root project together with everything it includes.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Projects in priority order, the root project last
    projects: Vec<Project>,
}

impl Workspace {
    /// Load the project in `dir` and, depth-first, all projects it includes.
    pub fn load(dir: &Path) -> ProjectResult<Self> {
        let mut loader = Loader::default();
        loader.visit(dir)?;
        Ok(Workspace {
            projects: loader.loaded,
        })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// The project the workspace was loaded from.
    pub fn root(&self) -> Option<&Project> {
        self.projects.last()
    }

    /// Build settings of the root project.
    pub fn build(&self) -> BuildSection {
        self.root()
            .map(|project| project.manifest.build.clone())
            .unwrap_or_default()
    }

    /// Session with every project's fields, before any build settings.
    pub fn declare(&self) -> ProjectResult<Session> {
        info!("Initializing projects...");
        let mut session = Session::new();
        for project in &self.projects {
            debug!("Adding project {}", project.root.display());
            session.add_scope(&project.manifest.scope())?;
        }
        Ok(session)
    }

    /// Session with every project's fields and the root's `[build]` applied.
    pub fn session(&self) -> ProjectResult<Session> {
        let mut session = self.declare()?;
        self.build().apply(&mut session)?;
        Ok(session)
    }
}

#[derive(Default)]
struct Loader {
    stack: Vec<PathBuf>,
    loaded: Vec<Project>,
}

impl Loader {
    fn visit(
        &mut self,
        dir: &Path,
    ) -> ProjectResult<()> {
        let manifest = ProjectManifest::load(dir)?;
        let root = std::fs::canonicalize(dir)?;

        if let Some(start) = self.stack.iter().position(|entry| *entry == root) {
            let chain: Vec<String> = self.stack[start..]
                .iter()
                .chain(std::iter::once(&root))
                .map(|path| path.display().to_string())
                .collect();
            return Err(ProjectError::IncludeCycle(chain.join(" -> ")));
        }
        if self.loaded.iter().any(|project| project.root == root) {
            return Ok(());
        }

        self.stack.push(root.clone());
        for include in &manifest.project.include {
            self.visit(&root.join(include))?;
        }
        self.stack.pop();

        self.loaded.push(Project { root, manifest });
        Ok(())
    }
}
