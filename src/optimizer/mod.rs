//! Peephole optimizer
//!
//! Rewrites one compilation unit's syntax tree into a smaller, semantically
//! equivalent tree. The pass is a strict post-order walk: all children of a
//! node are reduced before the node itself is examined, and nodes created
//! while reducing a parent are not revisited during the same pass.
//!
//! Rules applied per node, in order:
//!
//! 1. parenthesization recomputation (`parens`)
//! 2. block unwrapping (`blocks`)
//! 3. `if` reduction: return fusion, else elimination, comma flattening and
//!    logical/ternary compaction (`branches`)
//!
//! One call is one pass. [`optimize_passes`] re-runs the pass until the
//! printed form stops changing.

mod blocks;
mod branches;
pub mod error;
pub mod parens;

pub use error::{OptimizeError, OptimizeResult};
pub use parens::fix_parens;

use tracing::debug;

use crate::syntax::{NodeId, NodeKind, SyntaxTree};

/// Counters for the rewrites applied during one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReduceStats {
    pub parens_changed: usize,
    pub blocks_unwrapped: usize,
    pub returns_fused: usize,
    pub elses_removed: usize,
    pub branches_flattened: usize,
    pub ifs_compacted: usize,
}

impl ReduceStats {
    pub fn total(&self) -> usize {
        self.parens_changed
            + self.blocks_unwrapped
            + self.returns_fused
            + self.elses_removed
            + self.branches_flattened
            + self.ifs_compacted
    }
}

/// Single-pass tree reducer.
pub struct BlockReducer<'t> {
    tree: &'t mut SyntaxTree,
    stats: ReduceStats,
}

impl<'t> BlockReducer<'t> {
    pub fn new(tree: &'t mut SyntaxTree) -> Self {
        BlockReducer {
            tree,
            stats: ReduceStats::default(),
        }
    }

    /// Run one pass from the root. Returns the (possibly new) root.
    pub fn run(mut self) -> OptimizeResult<(NodeId, ReduceStats)> {
        let root = self.tree.root();
        self.visit(root)?;
        Ok((self.tree.root(), self.stats))
    }

    fn visit(
        &mut self,
        id: NodeId,
    ) -> OptimizeResult<()> {
        for child in self.tree.children(id).to_vec() {
            self.visit(child)?;
        }

        let kind = self.tree.kind(id);
        if kind.is_expression() && self.tree.is_parenthesized(id) && self.fix_parens(id) {
            self.stats.parens_changed += 1;
        }

        match kind {
            NodeKind::Block => self.unwrap_block(id),
            NodeKind::If => self.reduce_if(id),
            _ => Ok(()),
        }
    }

    fn fix_parens(
        &mut self,
        id: NodeId,
    ) -> bool {
        fix_parens(self.tree, id)
    }
}

/// Optimize a tree in place with a single pass and return its root.
///
/// On error the tree may be partially rewritten and must be discarded.
pub fn optimize(tree: &mut SyntaxTree) -> OptimizeResult<NodeId> {
    let (root, stats) = BlockReducer::new(tree).run()?;
    debug!("Optimizer pass applied {} rewrites: {:?}", stats.total(), stats);
    Ok(root)
}

/// Re-run [`optimize`] until the printed tree stops changing, at most
/// `max_passes` times. Returns the number of passes that were run.
pub fn optimize_passes(
    tree: &mut SyntaxTree,
    max_passes: usize,
) -> OptimizeResult<usize> {
    let mut previous = tree.to_source();
    for pass in 1..=max_passes {
        optimize(tree)?;
        let current = tree.to_source();
        if current == previous {
            return Ok(pass);
        }
        previous = current;
    }
    Ok(max_passes)
}
