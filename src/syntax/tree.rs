//! Arena-backed syntax tree
//!
//! Every node lives in one `Vec` owned by [`SyntaxTree`]. A parent owns its
//! children through the ordered `children` list; the `parent` link is a plain
//! index used for upward navigation only. All structural edits go through the
//! tree so that both child lists and the moved node's parent link change
//! together.

use thiserror::Error;

use super::kind::{AssignOp, NodeKind, Role};
use super::node_id::NodeId;

/// Structural misuse of the tree API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The node has no parent and is not the root, so it has no slot to replace.
    #[error("node {0} is detached from the tree")]
    Detached(NodeId),

    /// The node is not a child of the given parent.
    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
}

/// A single syntax node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    rel: Option<Role>,
    parenthesized: bool,
    value: Option<String>,
    assign_op: Option<AssignOp>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            children: Vec::new(),
            parent: None,
            rel: None,
            parenthesized: false,
            value: None,
            assign_op: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Role this node occupies in its parent.
    pub fn rel(&self) -> Option<Role> {
        self.rel
    }

    pub fn is_parenthesized(&self) -> bool {
        self.parenthesized
    }

    /// Identifier name, literal text or label.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn assign_op(&self) -> Option<AssignOp> {
        self.assign_op
    }
}

/// One compilation unit's syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SyntaxTree {
    /// Create a tree holding a single root node of the given kind.
    pub fn new(root_kind: NodeKind) -> Self {
        SyntaxTree {
            nodes: vec![Node::new(root_kind)],
            root: NodeId(0),
        }
    }

    /// Create an empty `script` tree.
    pub fn script() -> Self {
        Self::new(NodeKind::Script)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Make `id` the root, detaching it from its current parent first.
    pub fn set_root(
        &mut self,
        id: NodeId,
    ) {
        self.detach(id);
        self.root = id;
    }

    /// Number of slots in the arena, including nodes no longer reachable.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Allocate a detached node.
    pub fn create(
        &mut self,
        kind: NodeKind,
    ) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    /// Allocate a detached leaf node carrying a value.
    pub fn create_leaf(
        &mut self,
        kind: NodeKind,
        value: impl Into<String>,
    ) -> NodeId {
        let id = self.create(kind);
        self.nodes[id.index()].value = Some(value.into());
        id
    }

    pub fn get(
        &self,
        id: NodeId,
    ) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(
        &self,
        id: NodeId,
    ) -> NodeKind {
        self.get(id).kind
    }

    /// Retag a node in place, keeping its position and children.
    pub fn set_kind(
        &mut self,
        id: NodeId,
        kind: NodeKind,
    ) {
        self.nodes[id.index()].kind = kind;
    }

    pub fn children(
        &self,
        id: NodeId,
    ) -> &[NodeId] {
        &self.get(id).children
    }

    pub fn child(
        &self,
        id: NodeId,
        index: usize,
    ) -> Option<NodeId> {
        self.get(id).children.get(index).copied()
    }

    pub fn len(
        &self,
        id: NodeId,
    ) -> usize {
        self.get(id).children.len()
    }

    pub fn parent(
        &self,
        id: NodeId,
    ) -> Option<NodeId> {
        self.get(id).parent
    }

    pub fn rel(
        &self,
        id: NodeId,
    ) -> Option<Role> {
        self.get(id).rel
    }

    pub fn value(
        &self,
        id: NodeId,
    ) -> Option<&str> {
        self.get(id).value.as_deref()
    }

    pub fn set_value(
        &mut self,
        id: NodeId,
        value: Option<String>,
    ) {
        self.nodes[id.index()].value = value;
    }

    pub fn assign_op(
        &self,
        id: NodeId,
    ) -> Option<AssignOp> {
        self.get(id).assign_op
    }

    pub fn set_assign_op(
        &mut self,
        id: NodeId,
        op: Option<AssignOp>,
    ) {
        self.nodes[id.index()].assign_op = op;
    }

    pub fn is_parenthesized(
        &self,
        id: NodeId,
    ) -> bool {
        self.get(id).parenthesized
    }

    pub fn set_parenthesized(
        &mut self,
        id: NodeId,
        parenthesized: bool,
    ) {
        self.nodes[id.index()].parenthesized = parenthesized;
    }

    /// First child bound to `role`.
    pub fn child_by_role(
        &self,
        id: NodeId,
        role: Role,
    ) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.rel(child) == Some(role))
    }

    /// Position of `child` inside `parent`.
    pub fn index_of(
        &self,
        parent: NodeId,
        child: NodeId,
    ) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Unlink `id` from its parent. No-op for detached nodes.
    pub fn detach(
        &mut self,
        id: NodeId,
    ) {
        if let Some(parent) = self.nodes[id.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|&c| c != id);
        }
        self.nodes[id.index()].rel = None;
    }

    /// Append `child` to `parent`, bound to `rel`.
    pub fn append(
        &mut self,
        parent: NodeId,
        child: NodeId,
        rel: Option<Role>,
    ) {
        self.detach(child);
        self.nodes[parent.index()].children.push(child);
        let node = &mut self.nodes[child.index()];
        node.parent = Some(parent);
        node.rel = rel;
    }

    /// Insert `child` at `index` inside `parent` as an unnamed child.
    ///
    /// The index is clamped to the current child count.
    pub fn insert(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) {
        self.detach(child);
        let children = &mut self.nodes[parent.index()].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.index()].parent = Some(parent);
    }

    /// Remove `child` from `parent`.
    pub fn remove(
        &mut self,
        parent: NodeId,
        child: NodeId,
    ) -> Result<(), TreeError> {
        if self.parent(child) != Some(parent) {
            return Err(TreeError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(())
    }

    /// Put `replacement` into the slot `old` occupies.
    ///
    /// `replacement` is first detached from wherever it lives (it may be a
    /// descendant of `old`), then takes over `old`'s position and role. When
    /// `old` is the root, `replacement` becomes the new root.
    pub fn replace(
        &mut self,
        old: NodeId,
        replacement: NodeId,
    ) -> Result<(), TreeError> {
        if old == replacement {
            return Ok(());
        }
        self.detach(replacement);

        match self.parent(old) {
            Some(parent) => {
                let position = self
                    .index_of(parent, old)
                    .ok_or(TreeError::NotAChild { parent, child: old })?;
                let rel = self.nodes[old.index()].rel.take();
                self.nodes[old.index()].parent = None;
                self.nodes[parent.index()].children[position] = replacement;
                let node = &mut self.nodes[replacement.index()];
                node.parent = Some(parent);
                node.rel = rel;
                Ok(())
            }
            None if old == self.root => {
                self.root = replacement;
                Ok(())
            }
            None => Err(TreeError::Detached(old)),
        }
    }

    /// Whether `id` or any of its descendants has the given kind.
    pub fn contains_kind(
        &self,
        id: NodeId,
        kind: NodeKind,
    ) -> bool {
        self.kind(id) == kind
            || self
                .children(id)
                .iter()
                .any(|&child| self.contains_kind(child, kind))
    }

    /// Compare two subtrees by kind, value, assignment operator and children.
    ///
    /// Parenthesization and roles are presentation details and are ignored.
    pub fn structurally_equal(
        &self,
        a: NodeId,
        b: NodeId,
    ) -> bool {
        let (left, right) = (self.get(a), self.get(b));
        left.kind == right.kind
            && left.value == right.value
            && left.assign_op == right.assign_op
            && left.children.len() == right.children.len()
            && left
                .children
                .iter()
                .zip(&right.children)
                .all(|(&x, &y)| self.structurally_equal(x, y))
    }
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::script()
    }
}
