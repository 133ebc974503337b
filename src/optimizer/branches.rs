//! `if` statement reduction
//!
//! ```text
//! if (c) return a; else return b;     =>  return c ? a : b;
//! if (c) { x; return; } else { y; }   =>  if (c) { x; return; } y;
//! if (c) { a(); b(); }                =>  c && (a(), b());
//! if (!c) a();                        =>  c || a();
//! if (c) x = 1; else x = 2;           =>  x = c ? 1 : 2;
//! if (c) a(); else b();               =>  c ? a() : b();
//! if (c);                             =>  c;
//! ```

use tracing::trace;

use crate::syntax::{NodeId, NodeKind, Role};

use super::{BlockReducer, OptimizeError, OptimizeResult};

impl BlockReducer<'_> {
    pub(super) fn reduce_if(
        &mut self,
        node: NodeId,
    ) -> OptimizeResult<()> {
        let condition = self.required(node, Role::Condition)?;
        let then_part = self.required(node, Role::ThenPart)?;
        let mut else_part = self.tree.child_by_role(node, Role::ElsePart);

        if let Some(else_id) = else_part {
            if self.fuse_returns(node, condition, then_part, else_id)? {
                return Ok(());
            }
            if self.ends_with_terminator(then_part) {
                self.rework_else(node, else_id)?;
                else_part = None;
            }
        }

        let then_part = self.combine_to_comma(then_part)?;
        let else_part = match else_part {
            Some(else_id) => Some(self.combine_to_comma(else_id)?),
            None => None,
        };

        match else_part {
            Some(else_id) => self.merge_parts(node, condition, then_part, else_id),
            None if self.tree.kind(then_part) == NodeKind::Semicolon => {
                self.compact_if(node, condition, then_part)
            }
            None => Ok(()),
        }
    }

    fn required(
        &self,
        node: NodeId,
        role: Role,
    ) -> OptimizeResult<NodeId> {
        self.tree
            .child_by_role(node, role)
            .ok_or(OptimizeError::MissingChild {
                kind: self.tree.kind(node),
                role,
            })
    }

    /// `if(c) return a; else return b;` into `return c?a:b;`.
    ///
    /// Both returns must carry a value; `return;` has nothing to select.
    fn fuse_returns(
        &mut self,
        node: NodeId,
        condition: NodeId,
        then_part: NodeId,
        else_part: NodeId,
    ) -> OptimizeResult<bool> {
        if self.tree.kind(then_part) != NodeKind::Return || self.tree.kind(else_part) != NodeKind::Return {
            return Ok(false);
        }
        let (Some(then_value), Some(else_value)) = (
            self.tree.child_by_role(then_part, Role::Value),
            self.tree.child_by_role(else_part, Role::Value),
        ) else {
            return Ok(false);
        };

        let hook = self.tree.hook(condition, then_value, else_value);
        let replacement = self.tree.return_stmt(Some(hook));
        self.tree.replace(node, replacement)?;
        for id in [hook, condition, then_value, else_value] {
            self.fix_parens(id);
        }

        trace!("Fused return branches into {}", replacement);
        self.stats.returns_fused += 1;
        Ok(true)
    }

    /// Whether a branch always leaves through `return` or `throw`.
    fn ends_with_terminator(
        &self,
        branch: NodeId,
    ) -> bool {
        let kind = self.tree.kind(branch);
        if kind.is_terminator() {
            return true;
        }
        kind == NodeKind::Block
            && self
                .tree
                .children(branch)
                .last()
                .is_some_and(|&last| self.tree.kind(last).is_terminator())
    }

    /// Move the else branch behind the `if` in the enclosing statement list.
    ///
    /// When the `if` does not sit in a block or script (for example it is
    /// itself an else branch), it is first wrapped in a new block that then
    /// receives the statements.
    fn rework_else(
        &mut self,
        node: NodeId,
        else_part: NodeId,
    ) -> OptimizeResult<()> {
        let parent = self.tree.parent(node);
        let (target, index) = match parent {
            Some(parent) if self.tree.kind(parent).is_statement_list() => {
                let position = self.tree.index_of(parent, node).ok_or(OptimizeError::Detached {
                    kind: NodeKind::If,
                })?;
                (parent, position + 1)
            }
            None if node != self.tree.root() => {
                return Err(OptimizeError::Detached { kind: NodeKind::If });
            }
            _ => {
                let wrapper = self.tree.create(NodeKind::Block);
                self.tree.replace(node, wrapper)?;
                self.tree.append(wrapper, node, None);
                (wrapper, 1)
            }
        };

        if self.tree.kind(else_part) == NodeKind::Block {
            let statements = self.tree.children(else_part).to_vec();
            for (offset, statement) in statements.into_iter().enumerate() {
                self.tree.insert(target, index + offset, statement);
            }
            self.tree.remove(node, else_part)?;
        } else {
            self.tree.insert(target, index, else_part);
        }

        self.stats.elses_removed += 1;
        Ok(())
    }

    /// Fold a block of expression statements into one comma expression
    /// statement. Other branches are returned unchanged.
    fn combine_to_comma(
        &mut self,
        branch: NodeId,
    ) -> OptimizeResult<NodeId> {
        if self.tree.kind(branch) != NodeKind::Block {
            return Ok(branch);
        }
        let statements = self.tree.children(branch).to_vec();
        if statements
            .iter()
            .any(|&statement| self.tree.kind(statement) != NodeKind::Semicolon)
        {
            return Ok(branch);
        }

        let expressions: Vec<NodeId> = statements
            .iter()
            .filter_map(|&statement| self.tree.child_by_role(statement, Role::Expression))
            .collect();

        let semicolon = match expressions.as_slice() {
            [] => self.tree.empty_stmt(),
            &[single] => self.tree.expr_stmt(single),
            many => {
                let comma = self.tree.comma(many);
                self.tree.expr_stmt(comma)
            }
        };
        self.tree.replace(branch, semicolon)?;
        for expression in expressions {
            self.fix_parens(expression);
        }

        self.stats.branches_flattened += 1;
        Ok(semicolon)
    }

    /// Both branches are expression statements: one ternary statement, or a
    /// single assignment when both sides assign the same variable.
    fn merge_parts(
        &mut self,
        node: NodeId,
        condition: NodeId,
        then_part: NodeId,
        else_part: NodeId,
    ) -> OptimizeResult<()> {
        if self.tree.kind(then_part) != NodeKind::Semicolon || self.tree.kind(else_part) != NodeKind::Semicolon {
            return Ok(());
        }
        let (Some(then_expr), Some(else_expr)) = (
            self.tree.child_by_role(then_part, Role::Expression),
            self.tree.child_by_role(else_part, Role::Expression),
        ) else {
            return Ok(());
        };

        let replacement = match self.combine_assignments(condition, then_expr, else_expr) {
            Some(statement) => statement,
            None => {
                let hook = self.tree.hook(condition, then_expr, else_expr);
                for id in [condition, then_expr, else_expr] {
                    self.fix_parens(id);
                }
                self.tree.expr_stmt(hook)
            }
        };
        self.tree.replace(node, replacement)?;

        self.stats.ifs_compacted += 1;
        Ok(())
    }

    /// `x op= a` / `x op= b` into `x op= c ? a : b`, returning the statement
    /// that now holds the merged assignment.
    ///
    /// Only plain identifier targets qualify: a member target such as
    /// `o[f()]` would be evaluated before the condition after merging. For
    /// the same reason a compound operator, which reads its target, merges
    /// only when the condition cannot write anything.
    fn combine_assignments(
        &mut self,
        condition: NodeId,
        then_expr: NodeId,
        else_expr: NodeId,
    ) -> Option<NodeId> {
        let tree = &*self.tree;
        if tree.kind(then_expr) != NodeKind::Assign || tree.kind(else_expr) != NodeKind::Assign {
            return None;
        }
        if tree.assign_op(then_expr) != tree.assign_op(else_expr) {
            return None;
        }
        let (&[then_target, then_value], &[else_target, else_value]) =
            (tree.children(then_expr), tree.children(else_expr))
        else {
            return None;
        };
        if tree.kind(then_target) != NodeKind::Identifier || !tree.structurally_equal(then_target, else_target) {
            return None;
        }
        if tree.assign_op(then_expr).is_some() && self.may_write(condition) {
            return None;
        }

        let statement = tree.parent(then_expr)?;
        let hook = self.tree.hook(condition, then_value, else_value);
        self.tree.append(then_expr, hook, None);
        for id in [condition, then_value, else_value, hook] {
            self.fix_parens(id);
        }
        Some(statement)
    }

    /// Whether evaluating `id` can assign a variable or run arbitrary code.
    fn may_write(
        &self,
        id: NodeId,
    ) -> bool {
        matches!(
            self.tree.kind(id),
            NodeKind::Assign
                | NodeKind::Increment
                | NodeKind::Decrement
                | NodeKind::PostIncrement
                | NodeKind::PostDecrement
                | NodeKind::Call
                | NodeKind::New
                | NodeKind::NewWithArgs
        ) || self.tree.children(id).iter().any(|&child| self.may_write(child))
    }

    /// `if` without else whose then branch is an expression statement.
    fn compact_if(
        &mut self,
        node: NodeId,
        condition: NodeId,
        then_part: NodeId,
    ) -> OptimizeResult<()> {
        match self.tree.child_by_role(then_part, Role::Expression) {
            None => {
                // if(c); => c;
                self.tree.remove(node, then_part)?;
                self.tree.append(node, condition, Some(Role::Expression));
                self.tree.set_kind(node, NodeKind::Semicolon);
            }
            Some(then_expr) => {
                let (kind, operand) = if self.tree.kind(condition) == NodeKind::Not {
                    let inner = self.tree.child(condition, 0).ok_or(OptimizeError::MissingChild {
                        kind: NodeKind::Not,
                        role: Role::Expression,
                    })?;
                    (NodeKind::Or, inner)
                } else {
                    (NodeKind::And, condition)
                };

                let logical = self.tree.binary(kind, operand, then_expr);
                self.tree.append(then_part, logical, Some(Role::Expression));
                self.fix_parens(then_expr);
                self.fix_parens(operand);
                self.tree.replace(node, then_part)?;
            }
        }

        self.stats.ifs_compacted += 1;
        Ok(())
    }
}
