use crate::ast::{AstNode, LeafNode, TreeNode, TreeNodeKind};
use crate::diagnostic::Diagnostic;
use crate::error::{Result, UsageError};
use crate::tokenizer::TokenKind;

/// Receiver of the parser's events.
///
/// Events are stack structured: `done` closes the node most recently opened
/// by `start`, and every `leaf` belongs to the innermost open node.
pub trait Accumulator {
    fn start(&mut self, kind: TreeNodeKind);

    fn leaf(&mut self, kind: TokenKind, start: usize, end: usize, diagnostics: Vec<Diagnostic>);

    fn done(&mut self, diagnostics: Vec<Diagnostic>);
}

impl<A: Accumulator + ?Sized> Accumulator for &mut A {
    fn start(&mut self, kind: TreeNodeKind) {
        (**self).start(kind)
    }

    fn leaf(&mut self, kind: TokenKind, start: usize, end: usize, diagnostics: Vec<Diagnostic>) {
        (**self).leaf(kind, start, end, diagnostics)
    }

    fn done(&mut self, diagnostics: Vec<Diagnostic>) {
        (**self).done(diagnostics)
    }
}

#[derive(Debug)]
struct Frame {
    kind: TreeNodeKind,
    children: Vec<AstNode>,
}

/// Builds a [`TreeNode`] from parser events.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    frames: Vec<Frame>,
    root: Option<TreeNode>,
    fault: Option<UsageError>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes started and not yet done.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_finished(&self) -> bool {
        self.fault.is_none() && self.frames.is_empty() && self.root.is_some()
    }

    pub fn finish(self) -> Result<TreeNode> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        match self.root {
            Some(root) if self.frames.is_empty() => Ok(root),
            _ => Err(UsageError::Unfinished(self.frames.len())),
        }
    }

    fn underflow(&mut self, event: &'static str) {
        if self.fault.is_none() {
            self.fault = Some(UsageError::StackUnderflow(event));
        }
    }
}

impl Accumulator for TreeBuilder {
    fn start(&mut self, kind: TreeNodeKind) {
        log::trace!("start {kind} at depth {}", self.frames.len());
        self.frames.push(Frame {
            kind,
            children: Vec::new(),
        });
    }

    fn leaf(&mut self, kind: TokenKind, start: usize, end: usize, diagnostics: Vec<Diagnostic>) {
        log::trace!("leaf {kind}[{start}, {end})");
        match self.frames.last_mut() {
            Some(frame) => frame
                .children
                .push(LeafNode::new(kind, start, end, diagnostics).into()),
            None => self.underflow("leaf"),
        }
    }

    fn done(&mut self, diagnostics: Vec<Diagnostic>) {
        let Some(frame) = self.frames.pop() else {
            self.underflow("done");
            return;
        };
        log::trace!("done {} with {} diagnostic(s)", frame.kind, diagnostics.len());

        let node = TreeNode::new(frame.kind, frame.children, diagnostics);
        match self.frames.last_mut() {
            Some(parent) => parent.children.push(node.into()),
            None => self.root = Some(node),
        }
    }
}
