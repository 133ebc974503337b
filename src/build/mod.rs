//! Build pipeline
//!
//! For every permutation of a session, optimize every compilation unit in its
//! own copy of the unit's tree and collect the results under the artifact name
//! `<prefix>-<hash>`. Units of one permutation are processed in parallel; each
//! worker makes the permutation current on its own thread while it runs.
//!
//! When no field varies, a single artifact is built for the empty
//! permutation.

pub mod error;

pub use error::{BuildError, BuildResult};

use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::optimizer::{optimize, optimize_passes, OptimizeError, OptimizeResult};
use crate::permutation::{Permutation, PermutationContext, Session};
use crate::project::{BuildSection, Workspace};
use crate::syntax::SyntaxTree;

/// Hook run on a unit's tree before optimization, e.g. to fold the current
/// permutation's values into the code.
pub type PrepareFn = dyn Fn(&Permutation, &mut SyntaxTree) -> OptimizeResult<()> + Send + Sync;

/// One compilation unit.
#[derive(Debug, Clone)]
pub struct Unit {
    pub name: String,
    pub tree: SyntaxTree,
}

impl Unit {
    pub fn new(
        name: impl Into<String>,
        tree: SyntaxTree,
    ) -> Self {
        Unit {
            name: name.into(),
            tree,
        }
    }
}

/// Optimized unit.
#[derive(Debug, Clone)]
pub struct UnitOutput {
    pub tree: SyntaxTree,
    /// Optimizer passes that were run
    pub passes: usize,
}

/// Result of building one unit for one permutation.
#[derive(Debug, Clone)]
pub struct UnitOutcome {
    pub name: String,
    pub result: Result<UnitOutput, OptimizeError>,
}

impl UnitOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn output(&self) -> BuildResult<&UnitOutput> {
        self.result.as_ref().map_err(|source| BuildError::Unit {
            unit: self.name.clone(),
            source: source.clone(),
        })
    }
}

/// Everything built for one permutation.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub name: String,
    pub permutation: Arc<Permutation>,
    pub units: Vec<UnitOutcome>,
}

impl Artifact {
    pub fn failures(&self) -> impl Iterator<Item = &UnitOutcome> {
        self.units.iter().filter(|unit| !unit.is_ok())
    }

    /// `Err` naming every failed unit, if any failed.
    pub fn ensure_success(&self) -> BuildResult<()> {
        let units: Vec<String> = self.failures().map(|unit| unit.name.clone()).collect();
        if units.is_empty() {
            Ok(())
        } else {
            Err(BuildError::UnitsFailed {
                artifact: self.name.clone(),
                units,
            })
        }
    }

    pub fn unit(
        &self,
        name: &str,
    ) -> Option<&UnitOutcome> {
        self.units.iter().find(|unit| unit.name == name)
    }
}

/// Permutation-driven build over a set of units.
pub struct Pipeline {
    session: Session,
    prefix: String,
    passes: usize,
    prepare: Option<Arc<PrepareFn>>,
}

impl Pipeline {
    pub fn new(session: Session) -> Self {
        let defaults = BuildSection::default();
        Pipeline {
            session,
            prefix: defaults.prefix,
            passes: defaults.passes,
            prepare: None,
        }
    }

    /// Pipeline for a loaded workspace with the root project's `[build]`
    /// settings applied.
    pub fn from_workspace(workspace: &Workspace) -> BuildResult<Self> {
        let mut pipeline = Pipeline::new(workspace.declare()?);
        pipeline.configure(&workspace.build())?;
        Ok(pipeline)
    }

    /// Apply pins, opened fields, prefix and pass count.
    pub fn configure(
        &mut self,
        build: &BuildSection,
    ) -> BuildResult<()> {
        build.apply(&mut self.session)?;
        self.prefix = build.prefix.clone();
        self.passes = build.passes;
        Ok(())
    }

    pub fn prefix(
        mut self,
        prefix: impl Into<String>,
    ) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Maximum optimizer passes per unit; `0` and `1` both mean one pass.
    pub fn passes(
        mut self,
        passes: usize,
    ) -> Self {
        self.passes = passes;
        self
    }

    pub fn prepare(
        mut self,
        hook: impl Fn(&Permutation, &mut SyntaxTree) -> OptimizeResult<()> + Send + Sync + 'static,
    ) -> Self {
        self.prepare = Some(Arc::new(hook));
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Artifact name for a permutation.
    pub fn artifact_name(
        &self,
        permutation: &Permutation,
    ) -> String {
        format!("{}-{}", self.prefix, permutation.hash())
    }

    /// Build every permutation. Unit failures are reported per unit and never
    /// stop the build.
    pub fn run(
        &self,
        units: &[Unit],
    ) -> Vec<Artifact> {
        let time = Instant::now();
        let mut artifacts = Vec::new();

        let built = self.session.permutate(|permutation| {
            artifacts.push(self.build_permutation(Arc::clone(permutation), units));
            Ok::<(), std::convert::Infallible>(())
        });
        if matches!(built, Ok(0)) {
            info!("No variant fields, building a single artifact");
            artifacts.push(self.build_permutation(Arc::new(Permutation::default()), units));
        }

        debug!("Built {} artifact(s) in {:?}", artifacts.len(), time.elapsed());
        artifacts
    }

    fn build_permutation(
        &self,
        permutation: Arc<Permutation>,
        units: &[Unit],
    ) -> Artifact {
        let name = self.artifact_name(&permutation);
        info!("Building {} ({} units)", name, units.len());

        let outcomes: Vec<UnitOutcome> = units
            .par_iter()
            .map(|unit| {
                let _guard = PermutationContext::enter(Arc::clone(&permutation));
                UnitOutcome {
                    name: unit.name.clone(),
                    result: self.build_unit(&permutation, unit),
                }
            })
            .collect();

        for failed in outcomes.iter().filter(|outcome| !outcome.is_ok()) {
            if let Err(err) = &failed.result {
                warn!("{}: unit {} failed: {}", name, failed.name, err);
            }
        }

        Artifact {
            name,
            permutation,
            units: outcomes,
        }
    }

    fn build_unit(
        &self,
        permutation: &Permutation,
        unit: &Unit,
    ) -> OptimizeResult<UnitOutput> {
        let mut tree = unit.tree.clone();
        if let Some(prepare) = &self.prepare {
            prepare(permutation, &mut tree)?;
        }

        let passes = if self.passes > 1 {
            optimize_passes(&mut tree, self.passes)?
        } else {
            optimize(&mut tree)?;
            1
        };
        debug!("Optimized {} in {} pass(es)", unit.name, passes);
        Ok(UnitOutput { tree, passes })
    }
}
