use super::visitor::{dispatch, NodeRef, Visitor};
use super::TreeNode;

/// Indented outline of a syntax tree, one node per line.
///
/// Diagnostics are listed under the node that owns them, prefixed with `!`.
/// When the source is given, leaves also show their text.
#[derive(Debug, Clone, Copy)]
pub struct PrettyPrinter<'src> {
    indent_size: usize,
    source: Option<&'src str>,
}

impl Default for PrettyPrinter<'_> {
    fn default() -> Self {
        Self {
            indent_size: 4,
            source: None,
        }
    }
}

impl<'src> PrettyPrinter<'src> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(self, indent_size: usize) -> Self {
        Self {
            indent_size,
            ..self
        }
    }

    pub fn with_source(self, source: &'src str) -> Self {
        Self {
            source: Some(source),
            ..self
        }
    }

    pub fn print(&self, root: &TreeNode) -> String {
        let mut printing = Printing {
            config: self,
            level: 0,
            output: String::new(),
        };
        dispatch(&mut printing, NodeRef::Tree(root));
        printing.output
    }
}

struct Printing<'p, 'src> {
    config: &'p PrettyPrinter<'src>,
    level: usize,
    output: String,
}

impl Printing<'_, '_> {
    fn indent(&mut self, level: usize) {
        for _ in 0..level * self.config.indent_size {
            self.output.push(' ');
        }
    }

    fn line(&mut self, node: NodeRef<'_>) {
        self.indent(self.level);
        match node {
            NodeRef::Tree(tree) => self.output.push_str(tree.kind().as_str()),
            NodeRef::Leaf(leaf) => {
                self.output.push_str(&format!(
                    "{}[{}, {})",
                    leaf.token_kind(),
                    leaf.start(),
                    leaf.end()
                ));
                if let Some(source) = self.config.source {
                    self.output.push_str(&format!(" {:?}", leaf.text(source)));
                }
            }
        }
        self.output.push('\n');

        for diagnostic in node.diagnostics() {
            self.indent(self.level + 1);
            self.output.push_str("! ");
            self.output.push_str(&diagnostic.to_string());
            self.output.push('\n');
        }
    }
}

impl Visitor for Printing<'_, '_> {
    fn before(&mut self, node: NodeRef<'_>) {
        self.line(node);
        self.level += 1;
    }

    fn after(&mut self, _node: NodeRef<'_>) {
        self.level -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_print_with_source() {
        let source = "Hi $name<% x %>";
        let root = parse(source);
        let printed = PrettyPrinter::new()
            .with_indent(2)
            .with_source(source)
            .print(&root);
        assert_eq!(
            printed,
            "G_STRING\n\
             \x20 TEXT[0, 3) \"Hi \"\n\
             \x20 DOLLAR_REFERENCE\n\
             \x20   DOLLAR_REFERENCE_DOLLAR[3, 4) \"$\"\n\
             \x20   DOLLAR_REFERENCE_BODY[4, 8) \"name\"\n\
             \x20 BLOCK_SCRIPTLET\n\
             \x20   BLOCK_SCRIPTLET_OPEN[8, 10) \"<%\"\n\
             \x20   SCRIPTLET_BODY[10, 13) \" x \"\n\
             \x20   SCRIPTLET_CLOSE[13, 15) \"%>\"\n"
        );
    }

    #[test]
    fn test_print_diagnostics() {
        let root = parse("<%");
        let printed = PrettyPrinter::new().print(&root);
        assert_eq!(
            printed,
            "G_STRING\n    \
             BLOCK_SCRIPTLET\n        \
             ! ran out of tokens; expected any of SCRIPTLET_BODY, SCRIPTLET_CLOSE.\n        \
             BLOCK_SCRIPTLET_OPEN[0, 2)\n"
        );
    }
}
