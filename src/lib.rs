//! Kiln - build toolchain core for C-family scripting languages
//!
//! Two independent engines:
//!
//! - [`optimizer`]: a single-pass peephole optimizer that rewrites a unit's
//!   syntax tree into a smaller, equivalent one (block unwrapping, `if`
//!   reduction, parenthesization repair)
//! - [`permutation`]: a field registry that enumerates build variants and
//!   names each one by a stable hash
//!
//! [`project`] loads field declarations from `kiln.toml` manifests and
//! [`build`] drives the optimizer once per permutation.
//!
//! # Example
//!
//! ```
//! use kiln::syntax::SyntaxTree;
//!
//! let mut tree = SyntaxTree::with_statements(|t| {
//!     let c = t.ident("c");
//!     let f = t.ident("f");
//!     let call = t.call(f, &[]);
//!     let body = t.expr_stmt(call);
//!     let block = t.block(&[body]);
//!     vec![t.if_stmt(c, block, None)]
//! });
//! kiln::optimizer::optimize(&mut tree).unwrap();
//! assert_eq!(tree.to_source(), "c&&f();");
//! ```

#![doc(html_root_url = "https://docs.rs/kiln")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod build;
pub mod optimizer;
pub mod permutation;
pub mod project;
pub mod syntax;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::permutation::Session;
use crate::project::Workspace;
use crate::syntax::SyntaxTree;

/// Toolchain version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Toolchain name
pub const NAME: &str = "Kiln";

/// Read a JSON syntax tree from a file
pub fn load_tree(path: &Path) -> Result<SyntaxTree> {
    debug!("Reading tree {}", path.display());
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    SyntaxTree::from_json(&json)
        .with_context(|| format!("Invalid syntax tree: {}", path.display()))
}

/// Read and optimize a JSON syntax tree, running at most `passes` passes
pub fn optimize_file(
    path: &Path,
    passes: usize,
) -> Result<SyntaxTree> {
    let mut tree = load_tree(path)?;
    let ran = optimizer::optimize_passes(&mut tree, passes.max(1))
        .with_context(|| format!("Failed to optimize: {}", path.display()))?;
    debug!("{} optimized in {} pass(es)", path.display(), ran);
    Ok(tree)
}

/// Load the project in `dir` with its includes and apply its `[build]` section
pub fn load_session(dir: &Path) -> Result<Session> {
    let workspace = Workspace::load(dir)
        .with_context(|| format!("Failed to load project: {}", dir.display()))?;
    let session = workspace
        .session()
        .with_context(|| format!("Invalid field configuration in {}", dir.display()))?;
    Ok(session)
}
