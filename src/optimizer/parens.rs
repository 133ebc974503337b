//! Parenthesization recomputation
//!
//! Decides whether an expression still needs the parentheses the parser
//! recorded, given the kind of its parent and the operand slot it occupies.

use crate::syntax::{prec, NodeId, NodeKind, Role, SyntaxTree};

/// Recompute the `parenthesized` flag of `id` against its parent.
///
/// Non-expression nodes and the root are left alone. Returns whether the
/// flag changed.
pub fn fix_parens(
    tree: &mut SyntaxTree,
    id: NodeId,
) -> bool {
    let kind = tree.kind(id);
    let Some(parent) = tree.parent(id) else {
        return false;
    };
    if !kind.is_expression() {
        return false;
    }

    let before = tree.is_parenthesized(id);
    let parent_kind = tree.kind(parent);

    let needed = if parent_kind == NodeKind::Return {
        Some(false)
    } else if kind == NodeKind::Function && parent_kind == NodeKind::Call {
        // 直接调用的函数字面量保持原样
        None
    } else if let Some(min) = slot_precedence(tree, parent, id) {
        Some(needs_parens(tree, parent, id, min))
    } else if tree.rel(id) == Some(Role::Condition) {
        Some(false)
    } else {
        None
    };

    match needed {
        Some(flag) => {
            tree.set_parenthesized(id, flag);
            flag != before
        }
        None => false,
    }
}

fn needs_parens(
    tree: &SyntaxTree,
    parent: NodeId,
    id: NodeId,
    min: u8,
) -> bool {
    let kind = tree.kind(id);
    let parent_kind = tree.kind(parent);

    // `new (f())()` 与 `new f()()` 含义不同
    if kind == NodeKind::Call
        && matches!(parent_kind, NodeKind::New | NodeKind::NewWithArgs)
        && tree.index_of(parent, id) == Some(0)
    {
        return true;
    }

    kind.precedence().is_some_and(|level| level < min)
}

/// Weakest precedence an operand may have in the slot `child` occupies
/// without parentheses. `None` when `parent` is not an expression context.
pub fn slot_precedence(
    tree: &SyntaxTree,
    parent: NodeId,
    child: NodeId,
) -> Option<u8> {
    let parent_kind = tree.kind(parent);
    let position = tree.index_of(parent, child)?;
    if tree.rel(child) == Some(Role::Initializer) {
        return Some(prec::ASSIGN);
    }

    let min = match parent_kind {
        NodeKind::Comma => prec::COMMA,
        NodeKind::Assign => {
            if position == 0 {
                prec::MEMBER
            } else {
                prec::ASSIGN
            }
        }
        NodeKind::Hook => match tree.rel(child) {
            Some(Role::Condition) => prec::OR,
            _ => prec::ASSIGN,
        },
        NodeKind::Call | NodeKind::New | NodeKind::NewWithArgs | NodeKind::Dot | NodeKind::Index => {
            if position == 0 {
                prec::MEMBER
            } else {
                prec::COMMA
            }
        }
        NodeKind::List | NodeKind::ArrayInit => prec::ASSIGN,
        NodeKind::PropertyInit => {
            if position == 0 {
                prec::COMMA
            } else {
                prec::ASSIGN
            }
        }
        NodeKind::PostIncrement | NodeKind::PostDecrement => prec::POSTFIX,
        kind if kind.is_unary() => prec::UNARY,
        kind if kind.is_left_assoc_binary() => {
            let level = kind.precedence()?;
            if position == 0 {
                level
            } else {
                level + 1
            }
        }
        kind => kind.precedence()?,
    };
    Some(min)
}
