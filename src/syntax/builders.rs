//! Construction helpers
//!
//! Thin wrappers over [`SyntaxTree::create`] and [`SyntaxTree::append`] that
//! produce the child layout the optimizer and printer expect:
//!
//! ```text
//! if          condition, thenPart, elsePart?
//! hook        condition, thenPart, elsePart
//! return      value?
//! throw       exception
//! semicolon   expression?      (no expression = empty statement)
//! call        callee, list
//! assign      target, value    (assign_op for compound forms)
//! function    param*, body     (body is a script)
//! ```

use super::kind::{AssignOp, NodeKind, Role};
use super::node_id::NodeId;
use super::tree::SyntaxTree;

impl SyntaxTree {
    pub fn ident(
        &mut self,
        name: &str,
    ) -> NodeId {
        self.create_leaf(NodeKind::Identifier, name)
    }

    pub fn number(
        &mut self,
        literal: impl ToString,
    ) -> NodeId {
        self.create_leaf(NodeKind::Number, literal.to_string())
    }

    pub fn string(
        &mut self,
        text: &str,
    ) -> NodeId {
        self.create_leaf(NodeKind::String, text)
    }

    /// `true`, `false`, `null`, `this` and other valueless leaves.
    pub fn literal(
        &mut self,
        kind: NodeKind,
    ) -> NodeId {
        self.create(kind)
    }

    /// Mark an expression as written inside parentheses.
    pub fn paren(
        &mut self,
        id: NodeId,
    ) -> NodeId {
        self.set_parenthesized(id, true);
        id
    }

    /// Generic operator node with positional children.
    pub fn operator(
        &mut self,
        kind: NodeKind,
        operands: &[NodeId],
    ) -> NodeId {
        let id = self.create(kind);
        for &operand in operands {
            self.append(id, operand, None);
        }
        id
    }

    pub fn binary(
        &mut self,
        kind: NodeKind,
        left: NodeId,
        right: NodeId,
    ) -> NodeId {
        self.operator(kind, &[left, right])
    }

    pub fn unary(
        &mut self,
        kind: NodeKind,
        operand: NodeId,
    ) -> NodeId {
        self.operator(kind, &[operand])
    }

    pub fn assign(
        &mut self,
        target: NodeId,
        value: NodeId,
    ) -> NodeId {
        self.operator(NodeKind::Assign, &[target, value])
    }

    /// Compound assignment such as `a += b`.
    pub fn assign_with(
        &mut self,
        op: AssignOp,
        target: NodeId,
        value: NodeId,
    ) -> NodeId {
        let id = self.assign(target, value);
        self.set_assign_op(id, Some(op));
        id
    }

    pub fn hook(
        &mut self,
        condition: NodeId,
        then_value: NodeId,
        else_value: NodeId,
    ) -> NodeId {
        let id = self.create(NodeKind::Hook);
        self.append(id, condition, Some(Role::Condition));
        self.append(id, then_value, Some(Role::ThenPart));
        self.append(id, else_value, Some(Role::ElsePart));
        id
    }

    pub fn comma(
        &mut self,
        items: &[NodeId],
    ) -> NodeId {
        self.operator(NodeKind::Comma, items)
    }

    pub fn call(
        &mut self,
        callee: NodeId,
        args: &[NodeId],
    ) -> NodeId {
        let list = self.operator(NodeKind::List, args);
        self.operator(NodeKind::Call, &[callee, list])
    }

    pub fn dot(
        &mut self,
        object: NodeId,
        property: &str,
    ) -> NodeId {
        let property = self.ident(property);
        self.operator(NodeKind::Dot, &[object, property])
    }

    pub fn index_expr(
        &mut self,
        object: NodeId,
        index: NodeId,
    ) -> NodeId {
        self.operator(NodeKind::Index, &[object, index])
    }

    /// Expression statement.
    pub fn expr_stmt(
        &mut self,
        expression: NodeId,
    ) -> NodeId {
        let id = self.create(NodeKind::Semicolon);
        self.append(id, expression, Some(Role::Expression));
        id
    }

    /// The empty statement `;`.
    pub fn empty_stmt(&mut self) -> NodeId {
        self.create(NodeKind::Semicolon)
    }

    pub fn block(
        &mut self,
        statements: &[NodeId],
    ) -> NodeId {
        self.operator(NodeKind::Block, statements)
    }

    pub fn return_stmt(
        &mut self,
        value: Option<NodeId>,
    ) -> NodeId {
        let id = self.create(NodeKind::Return);
        if let Some(value) = value {
            self.append(id, value, Some(Role::Value));
        }
        id
    }

    pub fn throw_stmt(
        &mut self,
        exception: NodeId,
    ) -> NodeId {
        let id = self.create(NodeKind::Throw);
        self.append(id, exception, Some(Role::Exception));
        id
    }

    pub fn if_stmt(
        &mut self,
        condition: NodeId,
        then_part: NodeId,
        else_part: Option<NodeId>,
    ) -> NodeId {
        let id = self.create(NodeKind::If);
        self.append(id, condition, Some(Role::Condition));
        self.append(id, then_part, Some(Role::ThenPart));
        if let Some(else_part) = else_part {
            self.append(id, else_part, Some(Role::ElsePart));
        }
        id
    }

    pub fn while_stmt(
        &mut self,
        condition: NodeId,
        body: NodeId,
    ) -> NodeId {
        let id = self.create(NodeKind::While);
        self.append(id, condition, Some(Role::Condition));
        self.append(id, body, Some(Role::Body));
        id
    }

    /// `try { .. } catch (name) { .. } finally { .. }`
    pub fn try_stmt(
        &mut self,
        try_block: NodeId,
        catch: Option<(&str, NodeId)>,
        finally_block: Option<NodeId>,
    ) -> NodeId {
        let id = self.create(NodeKind::Try);
        self.append(id, try_block, Some(Role::TryBlock));
        if let Some((name, body)) = catch {
            let clause = self.create_leaf(NodeKind::Catch, name);
            self.append(clause, body, Some(Role::Body));
            self.append(id, clause, None);
        }
        if let Some(finally_block) = finally_block {
            self.append(id, finally_block, Some(Role::FinallyBlock));
        }
        id
    }

    /// `var name = init;` with a single declarator.
    pub fn var_stmt(
        &mut self,
        name: &str,
        initializer: Option<NodeId>,
    ) -> NodeId {
        let id = self.create(NodeKind::Var);
        let declarator = self.ident(name);
        if let Some(initializer) = initializer {
            self.append(declarator, initializer, Some(Role::Initializer));
        }
        self.append(id, declarator, None);
        id
    }

    /// Function literal; the body becomes a `script` node.
    pub fn function(
        &mut self,
        name: Option<&str>,
        params: &[&str],
        body: &[NodeId],
    ) -> NodeId {
        let id = self.create(NodeKind::Function);
        if let Some(name) = name {
            self.set_value(id, Some(name.to_string()));
        }
        for param in params {
            let param = self.ident(param);
            self.append(id, param, Some(Role::Param));
        }
        let script = self.operator(NodeKind::Script, body);
        self.append(id, script, Some(Role::Body));
        id
    }

    /// Append a statement to a block or script.
    pub fn push_stmt(
        &mut self,
        list: NodeId,
        statement: NodeId,
    ) {
        self.append(list, statement, None);
    }

    /// Build a tree whose root script holds the given statements.
    pub fn with_statements(
        build: impl FnOnce(&mut SyntaxTree) -> Vec<NodeId>,
    ) -> SyntaxTree {
        let mut tree = SyntaxTree::script();
        let root = tree.root();
        for statement in build(&mut tree) {
            tree.push_stmt(root, statement);
        }
        tree
    }
}
