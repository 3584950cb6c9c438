use crate::diagnostic::Diagnostic;
use crate::tokenizer::TokenKind;

use super::{AstNode, LeafNode, TreeNode, TreeNodeKind};

/// A borrowed view of either node shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Tree(&'a TreeNode),
    Leaf(&'a LeafNode),
}

impl<'a> NodeRef<'a> {
    pub fn diagnostics(&self) -> &'a [Diagnostic] {
        match self {
            Self::Tree(t) => t.diagnostics(),
            Self::Leaf(l) => l.diagnostics(),
        }
    }

    pub fn has_diagnostics(&self) -> bool {
        match self {
            Self::Tree(t) => {
                !t.diagnostics().is_empty()
                    || t.children().iter().any(|c| c.as_node_ref().has_diagnostics())
            }
            Self::Leaf(l) => !l.diagnostics().is_empty(),
        }
    }
}

impl<'a> From<&'a AstNode> for NodeRef<'a> {
    fn from(node: &'a AstNode) -> Self {
        match node {
            AstNode::Tree(t) => Self::Tree(t),
            AstNode::Leaf(l) => Self::Leaf(l),
        }
    }
}

impl<'a> From<&'a TreeNode> for NodeRef<'a> {
    fn from(node: &'a TreeNode) -> Self {
        Self::Tree(node)
    }
}

impl<'a> From<&'a LeafNode> for NodeRef<'a> {
    fn from(node: &'a LeafNode) -> Self {
        Self::Leaf(node)
    }
}

/// Walks a tree by node kind.
///
/// Every method has a default: tree methods walk their children, leaf
/// methods do nothing. `before` and `after` run around every node reached
/// through [`dispatch`], so an implementation overrides only what it needs.
#[allow(unused_variables)]
pub trait Visitor {
    fn before(&mut self, node: NodeRef<'_>) {}

    fn after(&mut self, node: NodeRef<'_>) {}

    fn visit_g_string(&mut self, node: &TreeNode) {
        walk_tree(self, node)
    }

    fn visit_dollar_reference(&mut self, node: &TreeNode) {
        walk_tree(self, node)
    }

    fn visit_block_scriptlet(&mut self, node: &TreeNode) {
        walk_tree(self, node)
    }

    fn visit_expression_scriptlet(&mut self, node: &TreeNode) {
        walk_tree(self, node)
    }

    fn visit_import_block(&mut self, node: &TreeNode) {
        walk_tree(self, node)
    }

    fn visit_dollar_scriptlet(&mut self, node: &TreeNode) {
        walk_tree(self, node)
    }

    fn visit_text(&mut self, leaf: &LeafNode) {
        walk_leaf(self, leaf)
    }

    fn visit_dollar_reference_dollar(&mut self, leaf: &LeafNode) {
        walk_leaf(self, leaf)
    }

    fn visit_dollar_reference_body(&mut self, leaf: &LeafNode) {
        walk_leaf(self, leaf)
    }

    fn visit_block_scriptlet_open(&mut self, leaf: &LeafNode) {
        walk_leaf(self, leaf)
    }

    fn visit_expression_scriptlet_open(&mut self, leaf: &LeafNode) {
        walk_leaf(self, leaf)
    }

    fn visit_scriptlet_body(&mut self, leaf: &LeafNode) {
        walk_leaf(self, leaf)
    }

    fn visit_scriptlet_close(&mut self, leaf: &LeafNode) {
        walk_leaf(self, leaf)
    }

    fn visit_import_block_open(&mut self, leaf: &LeafNode) {
        walk_leaf(self, leaf)
    }

    fn visit_import_block_body(&mut self, leaf: &LeafNode) {
        walk_leaf(self, leaf)
    }

    fn visit_import_block_close(&mut self, leaf: &LeafNode) {
        walk_leaf(self, leaf)
    }

    fn visit_dollar_scriptlet_open(&mut self, leaf: &LeafNode) {
        walk_leaf(self, leaf)
    }

    fn visit_dollar_scriptlet_body(&mut self, leaf: &LeafNode) {
        walk_leaf(self, leaf)
    }

    fn visit_dollar_scriptlet_close(&mut self, leaf: &LeafNode) {
        walk_leaf(self, leaf)
    }
}

/// Runs the hooks and the kind-specific method for `node`.
pub fn dispatch<V: Visitor + ?Sized>(visitor: &mut V, node: NodeRef<'_>) {
    visitor.before(node);
    match node {
        NodeRef::Tree(tree) => dispatch_tree(visitor, tree),
        NodeRef::Leaf(leaf) => dispatch_leaf(visitor, leaf),
    }
    visitor.after(node);
}

pub fn dispatch_tree<V: Visitor + ?Sized>(visitor: &mut V, node: &TreeNode) {
    match node.kind() {
        TreeNodeKind::GString => visitor.visit_g_string(node),
        TreeNodeKind::DollarReference => visitor.visit_dollar_reference(node),
        TreeNodeKind::BlockScriptlet => visitor.visit_block_scriptlet(node),
        TreeNodeKind::ExpressionScriptlet => visitor.visit_expression_scriptlet(node),
        TreeNodeKind::ImportBlock => visitor.visit_import_block(node),
        TreeNodeKind::DollarScriptlet => visitor.visit_dollar_scriptlet(node),
    }
}

pub fn dispatch_leaf<V: Visitor + ?Sized>(visitor: &mut V, leaf: &LeafNode) {
    match leaf.token_kind() {
        TokenKind::Text => visitor.visit_text(leaf),
        TokenKind::DollarReferenceDollar => visitor.visit_dollar_reference_dollar(leaf),
        TokenKind::DollarReferenceBody => visitor.visit_dollar_reference_body(leaf),
        TokenKind::BlockScriptletOpen => visitor.visit_block_scriptlet_open(leaf),
        TokenKind::ExpressionScriptletOpen => visitor.visit_expression_scriptlet_open(leaf),
        TokenKind::ScriptletBody => visitor.visit_scriptlet_body(leaf),
        TokenKind::ScriptletClose => visitor.visit_scriptlet_close(leaf),
        TokenKind::ImportBlockOpen => visitor.visit_import_block_open(leaf),
        TokenKind::ImportBlockBody => visitor.visit_import_block_body(leaf),
        TokenKind::ImportBlockClose => visitor.visit_import_block_close(leaf),
        TokenKind::DollarScriptletOpen => visitor.visit_dollar_scriptlet_open(leaf),
        TokenKind::DollarScriptletBody => visitor.visit_dollar_scriptlet_body(leaf),
        TokenKind::DollarScriptletClose => visitor.visit_dollar_scriptlet_close(leaf),
    }
}

/// Dispatches every child of `node` in source order.
pub fn walk_children<V: Visitor + ?Sized>(visitor: &mut V, node: &TreeNode) {
    for child in node.children() {
        dispatch(visitor, child.as_node_ref());
    }
}

pub fn walk_tree<V: Visitor + ?Sized>(visitor: &mut V, node: &TreeNode) {
    walk_children(visitor, node)
}

pub fn walk_leaf<V: Visitor + ?Sized>(_visitor: &mut V, _leaf: &LeafNode) {}
