//! Node ID for the syntax tree arena
//!
//! Represents the index of a node inside its owning [`SyntaxTree`](super::SyntaxTree).

use std::fmt;

/// Index of a node inside a syntax tree arena.
///
/// `NodeId` is only meaningful for the tree that created it. Parent links are
/// stored as `NodeId`s too, so they never own anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the arena index of this node.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }
}

impl fmt::Display for NodeId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}
