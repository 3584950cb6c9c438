mod accumulator;
mod dialect;
mod grammar;

use crate::ast::TreeNode;
use crate::tokenizer::{TokenProvider, Tokenizer};

pub use self::accumulator::{Accumulator, TreeBuilder};
pub use self::dialect::{Dialect, Extended, Standard};
pub use self::grammar::STARTERS;

use self::grammar::Session;

/// Recursive-descent parser over a [`TokenProvider`].
///
/// Parsing never fails: problems in the input are reported as diagnostics
/// on the nodes where they occur.
#[derive(Debug, Default, Clone)]
pub struct Parser<D = Standard> {
    dialect: D,
}

impl Parser<Standard> {
    pub fn standard() -> Self {
        Self::new(Standard)
    }
}

impl Parser<Extended> {
    pub fn extended() -> Self {
        Self::new(Extended)
    }
}

impl<D: Dialect> Parser<D> {
    pub fn new(dialect: D) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Consumes every token of `tokens`, reporting the tree to `acc`.
    pub fn parse<P, A>(&self, tokens: &mut P, acc: &mut A)
    where
        P: TokenProvider + ?Sized,
        A: Accumulator + ?Sized,
    {
        log::debug!("parsing with the {} dialect", self.dialect.name());
        Session::new(&self.dialect, tokens, acc).g_string();
    }

    pub fn parse_tree<P>(&self, tokens: &mut P) -> TreeNode
    where
        P: TokenProvider + ?Sized,
    {
        let mut builder = TreeBuilder::new();
        self.parse(tokens, &mut builder);
        match builder.finish() {
            Ok(root) => {
                log::debug!(
                    "parsed tree with {} diagnostic(s)",
                    root.all_diagnostics().len()
                );
                root
            }
            Err(e) => unreachable!("parser left the tree builder inconsistent: {e}"),
        }
    }
}

/// Parse `source` with the standard dialect.
pub fn parse(source: &str) -> TreeNode {
    Parser::standard().parse_tree(&mut Tokenizer::new(source))
}

/// Parse `source` with the extended dialect, which permits import blocks.
pub fn parse_extended(source: &str) -> TreeNode {
    Parser::extended().parse_tree(&mut Tokenizer::new(source))
}
