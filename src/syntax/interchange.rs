//! Nested (de)serializable tree form
//!
//! External parsers and emitters exchange trees as JSON documents of nested
//! [`TreeNode`]s; the arena form is rebuilt on load.

use serde::{Deserialize, Serialize};

use super::kind::{AssignOp, NodeKind, Role};
use super::node_id::NodeId;
use super::tree::SyntaxTree;

/// Owned, nested mirror of one arena node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<Role>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub parenthesized: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, rename = "assignOp", skip_serializing_if = "Option::is_none")]
    pub assign_op: Option<AssignOp>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(kind: NodeKind) -> Self {
        TreeNode {
            kind,
            rel: None,
            parenthesized: false,
            value: None,
            assign_op: None,
            children: Vec::new(),
        }
    }
}

impl SyntaxTree {
    /// Rebuild an arena tree from its nested form. The root's `rel` is ignored.
    pub fn from_tree_node(document: &TreeNode) -> SyntaxTree {
        let mut tree = SyntaxTree::new(document.kind);
        let root = tree.root();
        tree.fill(root, document);
        tree
    }

    fn fill(
        &mut self,
        id: NodeId,
        source: &TreeNode,
    ) {
        self.set_parenthesized(id, source.parenthesized);
        self.set_value(id, source.value.clone());
        self.set_assign_op(id, source.assign_op);
        for child in &source.children {
            let child_id = self.create(child.kind);
            self.append(id, child_id, child.rel);
            self.fill(child_id, child);
        }
    }

    /// Nested form of the subtree rooted at `id`.
    pub fn to_tree_node(
        &self,
        id: NodeId,
    ) -> TreeNode {
        let node = self.get(id);
        TreeNode {
            kind: node.kind(),
            rel: node.rel(),
            parenthesized: node.is_parenthesized(),
            value: node.value().map(str::to_owned),
            assign_op: node.assign_op(),
            children: node
                .children()
                .iter()
                .map(|&child| self.to_tree_node(child))
                .collect(),
        }
    }

    /// Parse a JSON document into a tree.
    pub fn from_json(json: &str) -> serde_json::Result<SyntaxTree> {
        let document: TreeNode = serde_json::from_str(json)?;
        Ok(SyntaxTree::from_tree_node(&document))
    }

    /// Pretty-printed JSON of the reachable tree.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_tree_node(self.root()))
    }
}
