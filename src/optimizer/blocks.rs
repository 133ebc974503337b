//! Block unwrapping

use crate::syntax::{NodeId, NodeKind, Role};

use super::{BlockReducer, OptimizeResult};

impl BlockReducer<'_> {
    /// Replace empty blocks with `;` and single-statement blocks with their
    /// statement.
    ///
    /// Blocks owned by `try`/`catch` are syntax and stay. A one-statement
    /// block that contains an `if` keeps its braces when it is an `if`
    /// branch, or when it trails into one whose `else` follows it. Otherwise
    /// that `else` would bind to the inner `if`.
    pub(super) fn unwrap_block(
        &mut self,
        block: NodeId,
    ) -> OptimizeResult<()> {
        let parent_kind = self.tree.parent(block).map(|p| self.tree.kind(p));
        if matches!(parent_kind, Some(NodeKind::Try | NodeKind::Catch)) {
            return Ok(());
        }

        match self.tree.len(block) {
            0 => {
                let empty = self.tree.empty_stmt();
                self.tree.replace(block, empty)?;
            }
            1 => {
                if self.tree.contains_kind(block, NodeKind::If) && self.precedes_else(block) {
                    return Ok(());
                }
                let only = self.tree.children(block)[0];
                self.tree.replace(block, only)?;
            }
            _ => return Ok(()),
        }

        self.stats.blocks_unwrapped += 1;
        Ok(())
    }

    /// Whether the printed form of `block` could be followed by an `else`
    /// that belongs to an enclosing `if`.
    ///
    /// Walks up through statements whose last slot holds the block: loop
    /// bodies and `if` branches.
    fn precedes_else(
        &self,
        block: NodeId,
    ) -> bool {
        let mut child = block;
        while let Some(parent) = self.tree.parent(child) {
            let role = self.tree.rel(child);
            match self.tree.kind(parent) {
                NodeKind::If if child == block => return true,
                NodeKind::If => match role {
                    Some(Role::ThenPart) if self.tree.child_by_role(parent, Role::ElsePart).is_some() => {
                        return true
                    }
                    Some(Role::ThenPart | Role::ElsePart) => {}
                    _ => return false,
                },
                NodeKind::While | NodeKind::For | NodeKind::ForIn if role == Some(Role::Body) => {}
                _ => return false,
            }
            child = parent;
        }
        false
    }
}
