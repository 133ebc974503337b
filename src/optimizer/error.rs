//! Optimizer error types

use thiserror::Error;

use crate::syntax::{NodeKind, Role, TreeError};

/// Structural problems found while rewriting a tree.
///
/// Any of these makes the unit's output invalid; partial rewrites already
/// applied to the tree must be discarded by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// A node is missing a child its kind requires
    #[error("Malformed tree: {kind} node has no {role}")]
    MissingChild { kind: NodeKind, role: Role },

    /// A rewrite target has no slot to be replaced in
    #[error("Malformed tree: {kind} node is detached from the tree")]
    Detached { kind: NodeKind },

    /// Tree edit failed
    #[error("Tree edit failed: {0}")]
    Tree(#[from] TreeError),
}

/// Result type for optimizer operations
pub type OptimizeResult<T> = Result<T, OptimizeError>;
