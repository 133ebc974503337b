//! Compact source printer
//!
//! Renders a tree in minimal C-family syntax, emitting parentheses exactly
//! where nodes are flagged `parenthesized`. Used for diagnostics, tests and
//! the CLI; the production emitter lives outside this crate.

use super::kind::{NodeKind, Role};
use super::node_id::NodeId;
use super::tree::SyntaxTree;

impl SyntaxTree {
    /// Source text of the whole tree.
    pub fn to_source(&self) -> String {
        self.source_of(self.root())
    }

    /// Source text of the subtree at `id`.
    pub fn source_of(
        &self,
        id: NodeId,
    ) -> String {
        let mut printer = Printer {
            tree: self,
            out: String::new(),
        };
        printer.node(id);
        printer.out
    }
}

struct Printer<'a> {
    tree: &'a SyntaxTree,
    out: String,
}

impl Printer<'_> {
    fn node(
        &mut self,
        id: NodeId,
    ) {
        if self.tree.kind(id).is_expression() {
            self.expression(id);
        } else {
            self.statement(id);
        }
    }

    fn role(
        &mut self,
        id: NodeId,
        role: Role,
    ) {
        if let Some(child) = self.tree.child_by_role(id, role) {
            self.node(child);
        }
    }

    fn push(
        &mut self,
        text: &str,
    ) {
        // 关键字与标识符之间补空格
        let needs_space = matches!(
            (self.out.chars().last(), text.chars().next()),
            (Some(a), Some(b)) if is_word_char(a) && is_word_char(b)
        ) || matches!(
            (self.out.chars().last(), text.chars().next()),
            (Some('+'), Some('+')) | (Some('-'), Some('-'))
        );
        if needs_space {
            self.out.push(' ');
        }
        self.out.push_str(text);
    }

    fn statements(
        &mut self,
        id: NodeId,
    ) {
        for &child in self.tree.children(id) {
            self.node(child);
        }
    }

    fn statement(
        &mut self,
        id: NodeId,
    ) {
        let tree = self.tree;
        match tree.kind(id) {
            NodeKind::Script => self.statements(id),
            NodeKind::Block => {
                self.push("{");
                self.statements(id);
                self.push("}");
            }
            NodeKind::Semicolon => {
                self.role(id, Role::Expression);
                self.push(";");
            }
            NodeKind::If => {
                self.push("if(");
                self.role(id, Role::Condition);
                self.push(")");
                self.role(id, Role::ThenPart);
                if let Some(else_part) = tree.child_by_role(id, Role::ElsePart) {
                    self.push("else");
                    self.node(else_part);
                }
            }
            NodeKind::Return => {
                self.push("return");
                self.role(id, Role::Value);
                self.push(";");
            }
            NodeKind::Throw => {
                self.push("throw");
                self.role(id, Role::Exception);
                self.push(";");
            }
            NodeKind::Try => {
                self.push("try");
                self.role(id, Role::TryBlock);
                for &child in tree.children(id) {
                    if tree.kind(child) == NodeKind::Catch {
                        self.node(child);
                    }
                }
                if let Some(finally_block) = tree.child_by_role(id, Role::FinallyBlock) {
                    self.push("finally");
                    self.node(finally_block);
                }
            }
            NodeKind::Catch => {
                self.push("catch(");
                self.push(tree.value(id).unwrap_or("e"));
                self.push(")");
                self.role(id, Role::Body);
            }
            NodeKind::While => {
                self.push("while(");
                self.role(id, Role::Condition);
                self.push(")");
                self.role(id, Role::Body);
            }
            NodeKind::DoWhile => {
                self.push("do");
                self.role(id, Role::Body);
                self.push("while(");
                self.role(id, Role::Condition);
                self.push(");");
            }
            NodeKind::For => {
                self.push("for(");
                self.role(id, Role::Setup);
                self.push(";");
                self.role(id, Role::Condition);
                self.push(";");
                self.role(id, Role::Update);
                self.push(")");
                self.role(id, Role::Body);
            }
            NodeKind::ForIn => {
                self.push("for(");
                self.role(id, Role::Iterator);
                self.push("in");
                self.role(id, Role::Object);
                self.push(")");
                self.role(id, Role::Body);
            }
            NodeKind::Var => {
                self.push("var");
                for (position, &declarator) in tree.children(id).iter().enumerate() {
                    if position > 0 {
                        self.push(",");
                    }
                    self.push(tree.value(declarator).unwrap_or_default());
                    if let Some(init) = tree.child_by_role(declarator, Role::Initializer) {
                        self.push("=");
                        self.node(init);
                    }
                }
                let in_loop_header = matches!(
                    tree.parent(id).map(|p| tree.kind(p)),
                    Some(NodeKind::For | NodeKind::ForIn)
                );
                if !in_loop_header {
                    self.push(";");
                }
            }
            NodeKind::Break | NodeKind::Continue => {
                self.push(if tree.kind(id) == NodeKind::Break {
                    "break"
                } else {
                    "continue"
                });
                if let Some(label) = tree.value(id) {
                    self.push(label);
                }
                self.push(";");
            }
            NodeKind::List => self.separated(id, ","),
            NodeKind::PropertyInit => {
                if let [key, value] = tree.children(id) {
                    self.node(*key);
                    self.push(":");
                    self.node(*value);
                }
            }
            _ => self.expression(id),
        }
    }

    fn separated(
        &mut self,
        id: NodeId,
        separator: &str,
    ) {
        for (position, &child) in self.tree.children(id).iter().enumerate() {
            if position > 0 {
                self.push(separator);
            }
            self.node(child);
        }
    }

    fn expression(
        &mut self,
        id: NodeId,
    ) {
        let tree = self.tree;
        let parenthesized = tree.is_parenthesized(id);
        if parenthesized {
            self.push("(");
        }

        let kind = tree.kind(id);
        let children = tree.children(id);
        match kind {
            NodeKind::Identifier | NodeKind::Number | NodeKind::Regexp => {
                self.push(tree.value(id).unwrap_or_default());
            }
            NodeKind::String => {
                let quoted = serde_json::to_string(tree.value(id).unwrap_or_default())
                    .unwrap_or_else(|_| String::from("\"\""));
                self.push(&quoted);
            }
            NodeKind::True => self.push("true"),
            NodeKind::False => self.push("false"),
            NodeKind::Null => self.push("null"),
            NodeKind::This => self.push("this"),
            NodeKind::Function => {
                self.push("function");
                if let Some(name) = tree.value(id) {
                    self.push(name);
                }
                self.push("(");
                let params: Vec<NodeId> = children
                    .iter()
                    .copied()
                    .filter(|&c| tree.rel(c) == Some(Role::Param))
                    .collect();
                for (position, param) in params.into_iter().enumerate() {
                    if position > 0 {
                        self.push(",");
                    }
                    self.node(param);
                }
                self.push("){");
                self.role(id, Role::Body);
                self.push("}");
            }
            NodeKind::ArrayInit => {
                self.push("[");
                self.separated(id, ",");
                self.push("]");
            }
            NodeKind::ObjectInit => {
                self.push("{");
                self.separated(id, ",");
                self.push("}");
            }
            NodeKind::Call | NodeKind::NewWithArgs => {
                if kind == NodeKind::NewWithArgs {
                    self.push("new");
                }
                if let [callee, args, ..] = children {
                    self.node(*callee);
                    self.push("(");
                    self.node(*args);
                    self.push(")");
                }
            }
            NodeKind::New => {
                self.push("new");
                self.separated(id, "");
            }
            NodeKind::Dot => {
                if let [object, property] = children {
                    self.node(*object);
                    self.push(".");
                    self.node(*property);
                }
            }
            NodeKind::Index => {
                if let [object, index] = children {
                    self.node(*object);
                    self.push("[");
                    self.node(*index);
                    self.push("]");
                }
            }
            NodeKind::Hook => {
                self.role(id, Role::Condition);
                self.push("?");
                self.role(id, Role::ThenPart);
                self.push(":");
                self.role(id, Role::ElsePart);
            }
            NodeKind::Assign => {
                if let [target, value] = children {
                    self.node(*target);
                    if let Some(op) = tree.assign_op(id) {
                        self.push(op.as_str());
                    }
                    self.push("=");
                    self.node(*value);
                }
            }
            NodeKind::PostIncrement | NodeKind::PostDecrement => {
                self.separated(id, "");
                self.push(kind.operator().unwrap_or_default());
            }
            _ if kind.is_unary() => {
                self.push(kind.operator().unwrap_or_default());
                self.separated(id, "");
            }
            _ => {
                let op = kind.operator().unwrap_or(",");
                self.separated(id, op);
            }
        }

        if parenthesized {
            self.push(")");
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
