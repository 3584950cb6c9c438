//! The syntax tree produced by the parser.
//!
//! A tree is made of exactly two node shapes: [`TreeNode`]s, one per grammar
//! production, and [`LeafNode`]s, one per consumed token. Nodes carry their
//! own diagnostics only; use [`AstNode::all_diagnostics`] (or
//! [`TreeNode::all_diagnostics`] on the root) to gather those of a subtree.
//! A tree is valid for code generation only when that walk is empty.

mod printer;
mod visitor;

use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;
use crate::tokenizer::TokenKind;

pub use self::printer::PrettyPrinter;
pub use self::visitor::{
    dispatch, dispatch_leaf, dispatch_tree, walk_children, walk_leaf, walk_tree, NodeRef, Visitor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TreeNodeKind {
    GString,
    DollarReference,
    BlockScriptlet,
    ExpressionScriptlet,
    ImportBlock,
    DollarScriptlet,
}

impl TreeNodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GString => "G_STRING",
            Self::DollarReference => "DOLLAR_REFERENCE",
            Self::BlockScriptlet => "BLOCK_SCRIPTLET",
            Self::ExpressionScriptlet => "EXPRESSION_SCRIPTLET",
            Self::ImportBlock => "IMPORT_BLOCK",
            Self::DollarScriptlet => "DOLLAR_SCRIPTLET",
        }
    }
}

impl fmt::Display for TreeNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AstNode {
    Tree(TreeNode),
    Leaf(LeafNode),
}

impl AstNode {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Tree(t) => t.diagnostics(),
            Self::Leaf(l) => l.diagnostics(),
        }
    }

    /// Diagnostics of this node and all its descendants, parents before
    /// children, children in source order.
    pub fn all_diagnostics(&self) -> Vec<&Diagnostic> {
        let mut out = Vec::new();
        collect_into(self.as_node_ref(), &mut out);
        out
    }

    pub fn has_diagnostics(&self) -> bool {
        self.as_node_ref().has_diagnostics()
    }

    pub fn as_tree(&self) -> Option<&TreeNode> {
        match self {
            Self::Tree(t) => Some(t),
            Self::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            Self::Tree(_) => None,
            Self::Leaf(l) => Some(l),
        }
    }

    pub fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::from(self)
    }
}

impl From<TreeNode> for AstNode {
    fn from(node: TreeNode) -> Self {
        Self::Tree(node)
    }
}

impl From<LeafNode> for AstNode {
    fn from(node: LeafNode) -> Self {
        Self::Leaf(node)
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree(t) => write!(f, "{t}"),
            Self::Leaf(l) => write!(f, "{l}"),
        }
    }
}

/// An interior node: one grammar production and the nodes it consumed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeNode {
    kind: TreeNodeKind,
    children: Vec<AstNode>,
    diagnostics: Vec<Diagnostic>,
}

impl TreeNode {
    pub fn new(kind: TreeNodeKind, children: Vec<AstNode>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            kind,
            children,
            diagnostics,
        }
    }

    pub fn kind(&self) -> TreeNodeKind {
        self.kind
    }

    pub fn children(&self) -> &[AstNode] {
        &self.children
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn all_diagnostics(&self) -> Vec<&Diagnostic> {
        let mut out = Vec::new();
        collect_into(NodeRef::Tree(self), &mut out);
        out
    }

    pub fn has_diagnostics(&self) -> bool {
        NodeRef::Tree(self).has_diagnostics()
    }

    /// Descendants of the given kind in source order. The search does not
    /// continue below a match.
    pub fn find_descendants(&self, kind: TreeNodeKind) -> Vec<&TreeNode> {
        let mut found = Vec::new();
        self.find_into(kind, &mut found);
        found
    }

    fn find_into<'a>(&'a self, kind: TreeNodeKind, found: &mut Vec<&'a TreeNode>) {
        for child in &self.children {
            if let AstNode::Tree(tree) = child {
                if tree.kind == kind {
                    found.push(tree);
                } else {
                    tree.find_into(kind, found);
                }
            }
        }
    }

    /// The first direct child leaf with the given token kind.
    pub fn first_leaf(&self, token_kind: TokenKind) -> Option<&LeafNode> {
        self.children.iter().find_map(|child| match child {
            AstNode::Leaf(leaf) if leaf.token_kind == token_kind => Some(leaf),
            _ => None,
        })
    }

    /// Leaves directly below this node.
    pub fn leaves(&self) -> impl Iterator<Item = &LeafNode> {
        self.children.iter().filter_map(AstNode::as_leaf)
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        fmt_diagnostics(&self.diagnostics, f)
    }
}

/// A consumed token, as a span into the source it was lexed from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeafNode {
    token_kind: TokenKind,
    start: usize,
    end: usize,
    diagnostics: Vec<Diagnostic>,
}

impl LeafNode {
    pub fn new(
        token_kind: TokenKind,
        start: usize,
        end: usize,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            token_kind,
            start,
            end,
            diagnostics,
        }
    }

    pub fn token_kind(&self) -> TokenKind {
        self.token_kind
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The exact source text of this leaf, or `""` if `source` is not the
    /// text the tree was parsed from.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span()).unwrap_or_default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for LeafNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}, {})", self.token_kind, self.start, self.end)?;
        fmt_diagnostics(&self.diagnostics, f)
    }
}

fn fmt_diagnostics(diagnostics: &[Diagnostic], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if diagnostics.is_empty() {
        return Ok(());
    }
    f.write_str("(diagnostics: ")?;
    for (i, d) in diagnostics.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{d}")?;
    }
    f.write_str(")")
}

fn collect_into<'a>(node: NodeRef<'a>, out: &mut Vec<&'a Diagnostic>) {
    out.extend(node.diagnostics());
    if let NodeRef::Tree(tree) = node {
        for child in tree.children() {
            collect_into(child.as_node_ref(), out);
        }
    }
}

/// Every diagnostic in the tree below (and including) `node`, pre-order.
pub fn collect_diagnostics(node: &AstNode) -> Vec<&Diagnostic> {
    node.all_diagnostics()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: TokenKind, start: usize, end: usize) -> AstNode {
        LeafNode::new(kind, start, end, vec![]).into()
    }

    fn import_block(start: usize) -> AstNode {
        TreeNode::new(
            TreeNodeKind::ImportBlock,
            vec![
                leaf(TokenKind::ImportBlockOpen, start, start + 3),
                leaf(TokenKind::ImportBlockBody, start + 3, start + 4),
                leaf(TokenKind::ImportBlockClose, start + 4, start + 6),
            ],
            vec![],
        )
        .into()
    }

    #[test]
    fn test_collect_diagnostics_order() {
        let root = AstNode::Tree(TreeNode::new(
            TreeNodeKind::GString,
            vec![
                TreeNode::new(
                    TreeNodeKind::BlockScriptlet,
                    vec![
                        LeafNode::new(TokenKind::BlockScriptletOpen, 0, 2, vec![]).into(),
                        LeafNode::new(
                            TokenKind::Text,
                            2,
                            3,
                            vec![Diagnostic::new("leaf")],
                        )
                        .into(),
                    ],
                    vec![Diagnostic::new("scriptlet")],
                )
                .into(),
                LeafNode::new(TokenKind::Text, 3, 4, vec![Diagnostic::new("trailing")]).into(),
            ],
            vec![Diagnostic::new("root")],
        ));

        let messages: Vec<&str> = collect_diagnostics(&root)
            .iter()
            .map(|d| d.message())
            .collect();
        assert_eq!(messages, vec!["root", "scriptlet", "leaf", "trailing"]);
        assert!(root.has_diagnostics());
        // own diagnostics are not inherited
        assert_eq!(root.diagnostics().len(), 1);
    }

    #[test]
    fn test_find_descendants() {
        let root = TreeNode::new(
            TreeNodeKind::GString,
            vec![
                leaf(TokenKind::Text, 0, 1),
                import_block(1),
                leaf(TokenKind::Text, 7, 8),
                import_block(8),
            ],
            vec![],
        );

        let blocks = root.find_descendants(TreeNodeKind::ImportBlock);
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0].first_leaf(TokenKind::ImportBlockBody).map(LeafNode::span),
            Some(4..5)
        );
        assert_eq!(
            blocks[1].first_leaf(TokenKind::ImportBlockBody).map(LeafNode::span),
            Some(11..12)
        );
        assert!(root.find_descendants(TreeNodeKind::DollarScriptlet).is_empty());
        assert!(!root.has_diagnostics());
    }

    #[test]
    fn test_first_leaf() {
        let node = TreeNode::new(
            TreeNodeKind::DollarReference,
            vec![
                leaf(TokenKind::DollarReferenceDollar, 0, 1),
                leaf(TokenKind::DollarReferenceBody, 1, 6),
            ],
            vec![],
        );
        let body = node.first_leaf(TokenKind::DollarReferenceBody);
        assert_eq!(body.map(|l| l.text("$a.b.c")), Some("a.b.c"));
        assert_eq!(node.first_leaf(TokenKind::Text), None);
        assert_eq!(node.leaves().count(), 2);
    }

    #[test]
    fn test_display() {
        let node = TreeNode::new(
            TreeNodeKind::BlockScriptlet,
            vec![],
            vec![Diagnostic::new("a"), Diagnostic::new("b")],
        );
        assert_eq!(node.to_string(), "BLOCK_SCRIPTLET(diagnostics: a, b)");
        let leaf = LeafNode::new(TokenKind::Text, 0, 13, vec![]);
        assert_eq!(leaf.to_string(), "TEXT[0, 13)");
    }
}
