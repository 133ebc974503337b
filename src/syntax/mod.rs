//! Syntax tree model
//!
//! The in-memory tree the optimizer rewrites. Nodes live in an arena owned by
//! [`SyntaxTree`] and are addressed by [`NodeId`].
//!
//! # Architecture
//!
//! - [`NodeKind`](kind::NodeKind) - closed vocabulary of node types with precedence
//! - [`Role`](kind::Role) - named slot a child occupies in its parent
//! - [`NodeId`](node_id::NodeId) - arena index
//! - [`SyntaxTree`](tree::SyntaxTree) - the arena plus structural edit operations
//! - [`TreeNode`](interchange::TreeNode) - nested JSON interchange form
//!
//! Construction helpers and the compact source printer are implemented as
//! further `impl SyntaxTree` blocks in `builders` and `printer`.

pub mod builders;
pub mod interchange;
pub mod kind;
pub mod node_id;
pub mod printer;
pub mod tree;

pub use interchange::TreeNode;
pub use kind::{prec, AssignOp, NodeKind, Role};
pub use node_id::NodeId;
pub use tree::{Node, SyntaxTree, TreeError};

#[cfg(test)]
mod tests;
