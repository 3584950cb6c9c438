//! Lowers a template into a Groovy script whose `getTemplate()` returns a
//! closure writing the rendered text to `out`.

use anyhow::Context;
use gst::ast::{dispatch, walk_children, LeafNode, NodeRef, TreeNode, TreeNodeKind, Visitor};
use gst::tokenizer::TokenKind;

struct ScriptWriter<'src> {
    source: &'src str,
    level: usize,
    output: String,
}

impl<'src> ScriptWriter<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            level: 0,
            output: String::new(),
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.level {
            self.output.push_str("    ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn body_of(&self, node: &TreeNode, kind: TokenKind) -> Option<&'src str> {
        node.first_leaf(kind).map(|leaf| leaf.text(self.source))
    }

    /// `out << { ... }()` around an opaque expression.
    fn write_expression(&mut self, body: &str) {
        self.line("out << {");
        self.level += 1;
        self.line(body.trim());
        self.level -= 1;
        self.line("}()");
    }
}

impl Visitor for ScriptWriter<'_> {
    fn visit_g_string(&mut self, node: &TreeNode) {
        for block in node.find_descendants(TreeNodeKind::ImportBlock) {
            if let Some(body) = self.body_of(block, TokenKind::ImportBlockBody) {
                self.line(body.trim());
            }
        }
        self.line("def getTemplate() {");
        self.level += 1;
        self.line("return { out ->");
        self.level += 1;
        walk_children(self, node);
        self.level -= 1;
        self.line("}");
        self.level -= 1;
        self.line("}");
    }

    // hoisted by visit_g_string
    fn visit_import_block(&mut self, _node: &TreeNode) {}

    fn visit_block_scriptlet(&mut self, node: &TreeNode) {
        if let Some(body) = self.body_of(node, TokenKind::ScriptletBody) {
            for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
                self.line(line);
            }
        }
    }

    fn visit_expression_scriptlet(&mut self, node: &TreeNode) {
        if let Some(body) = self.body_of(node, TokenKind::ScriptletBody) {
            self.write_expression(body);
        }
    }

    fn visit_dollar_scriptlet(&mut self, node: &TreeNode) {
        if let Some(body) = self.body_of(node, TokenKind::DollarScriptletBody) {
            self.write_expression(body);
        }
    }

    fn visit_dollar_reference_body(&mut self, leaf: &LeafNode) {
        let text = format!("out << {}", leaf.text(self.source));
        self.line(&text);
    }

    fn visit_text(&mut self, leaf: &LeafNode) {
        let text = format!("out << \"{}\"", escape(leaf.text(self.source)));
        self.line(&text);
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            // `\$` in a template is a literal dollar
            '\\' if chars.peek() == Some(&'$') => {
                chars.next();
                escaped.push_str("\\$");
            }
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/sample.gst".to_string());
    let input = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;

    let root = gst::parse_extended(&input);
    let diagnostics = root.all_diagnostics();
    if !diagnostics.is_empty() {
        for diagnostic in &diagnostics {
            eprintln!("{diagnostic}");
        }
        anyhow::bail!("{path}: {} diagnostic(s), nothing lowered", diagnostics.len());
    }

    let mut writer = ScriptWriter::new(&input);
    dispatch(&mut writer, NodeRef::Tree(&root));
    print!("{}", writer.output);
    Ok(())
}
