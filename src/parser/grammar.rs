use crate::ast::TreeNodeKind;
use crate::diagnostic::Diagnostic;
use crate::tokenizer::{TokenKind, TokenProvider};

use super::accumulator::Accumulator;
use super::dialect::Dialect;

/// Token kinds that may begin a top-level construct.
pub const STARTERS: [TokenKind; 6] = [
    TokenKind::Text,
    TokenKind::ImportBlockOpen,
    TokenKind::BlockScriptletOpen,
    TokenKind::ExpressionScriptletOpen,
    TokenKind::DollarReferenceDollar,
    TokenKind::DollarScriptletOpen,
];

/// Ran out of tokens inside a production.
type Exhausted = Diagnostic;

/// State of a single parse.
pub(super) struct Session<'a, D: ?Sized, P: ?Sized, A: ?Sized> {
    dialect: &'a D,
    tokens: &'a mut P,
    acc: &'a mut A,
    /// Kinds matched by the production in progress, in order.
    stash: Vec<TokenKind>,
}

impl<'a, D, P, A> Session<'a, D, P, A>
where
    D: Dialect + ?Sized,
    P: TokenProvider + ?Sized,
    A: Accumulator + ?Sized,
{
    pub fn new(dialect: &'a D, tokens: &'a mut P, acc: &'a mut A) -> Self {
        Self {
            dialect,
            tokens,
            acc,
            stash: Vec::new(),
        }
    }

    /// `g_string := (TEXT | import_block | block_scriptlet
    ///   | expression_scriptlet | dollar_reference | dollar_scriptlet)*`
    pub fn g_string(&mut self) {
        self.acc.start(TreeNodeKind::GString);
        let mut diagnostics = Vec::new();

        while let Some(token) = self.tokens.current() {
            match token.kind {
                TokenKind::Text => {
                    self.acc.leaf(TokenKind::Text, token.start, token.end, Vec::new());
                    self.tokens.advance();
                }
                TokenKind::ImportBlockOpen => self.import_block(),
                TokenKind::BlockScriptletOpen => self.delimited(
                    TreeNodeKind::BlockScriptlet,
                    [
                        TokenKind::BlockScriptletOpen,
                        TokenKind::ScriptletBody,
                        TokenKind::ScriptletClose,
                    ],
                    Vec::new(),
                ),
                TokenKind::ExpressionScriptletOpen => self.delimited(
                    TreeNodeKind::ExpressionScriptlet,
                    [
                        TokenKind::ExpressionScriptletOpen,
                        TokenKind::ScriptletBody,
                        TokenKind::ScriptletClose,
                    ],
                    Vec::new(),
                ),
                TokenKind::DollarReferenceDollar => self.dollar_reference(),
                TokenKind::DollarScriptletOpen => self.delimited(
                    TreeNodeKind::DollarScriptlet,
                    [
                        TokenKind::DollarScriptletOpen,
                        TokenKind::DollarScriptletBody,
                        TokenKind::DollarScriptletClose,
                    ],
                    Vec::new(),
                ),
                found => {
                    log::warn!("skipping {token}: no construct starts with {found}");
                    diagnostics.push(Diagnostic::unexpected(found, &STARTERS));
                    self.tokens.advance();
                }
            }
        }

        self.acc.done(diagnostics);
    }

    /// `import_block := IMPORT_BLOCK_OPEN IMPORT_BLOCK_BODY? IMPORT_BLOCK_CLOSE`
    fn import_block(&mut self) {
        let mut diagnostics = Vec::new();
        if !self.dialect.import_blocks_permitted() {
            diagnostics.push(Diagnostic::import_block_not_permitted(self.dialect.name()));
        }
        self.delimited(
            TreeNodeKind::ImportBlock,
            [
                TokenKind::ImportBlockOpen,
                TokenKind::ImportBlockBody,
                TokenKind::ImportBlockClose,
            ],
            diagnostics,
        );
    }

    /// `OPEN BODY? CLOSE`, the shape shared by every scriptlet.
    fn delimited(
        &mut self,
        node: TreeNodeKind,
        [open, body, close]: [TokenKind; 3],
        mut diagnostics: Vec<Diagnostic>,
    ) {
        self.acc.start(node);
        let parsed = self.delimited_parts(open, body, close);
        self.finish_production(parsed, &mut diagnostics);
        self.acc.done(diagnostics);
    }

    fn delimited_parts(
        &mut self,
        open: TokenKind,
        body: TokenKind,
        close: TokenKind,
    ) -> Result<(), Exhausted> {
        self.expect_leaf(&[open])?;
        self.expect_leaf(&[body, close])?;
        if self.is_stashed(body) {
            self.expect_leaf(&[close])?;
        }
        Ok(())
    }

    /// `dollar_reference := DOLLAR_REFERENCE_DOLLAR DOLLAR_REFERENCE_BODY`
    fn dollar_reference(&mut self) {
        self.acc.start(TreeNodeKind::DollarReference);
        let parsed = self
            .expect_leaf(&[TokenKind::DollarReferenceDollar])
            .and_then(|_| self.expect_leaf(&[TokenKind::DollarReferenceBody]));
        let mut diagnostics = Vec::new();
        self.finish_production(parsed.map(drop), &mut diagnostics);
        self.acc.done(diagnostics);
    }

    fn finish_production(
        &mut self,
        parsed: Result<(), Exhausted>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if let Err(exhausted) = parsed {
            diagnostics.push(exhausted);
        }
        self.stash.clear();
    }

    /// Consumes the current token as a leaf, attaching a diagnostic when its
    /// kind is not one of `any_of`. Fails only when no token is left.
    fn expect_leaf(&mut self, any_of: &[TokenKind]) -> Result<TokenKind, Exhausted> {
        let Some(token) = self.tokens.current() else {
            return Err(Diagnostic::out_of_tokens(any_of));
        };

        let diagnostics = if any_of.contains(&token.kind) {
            self.stash.push(token.kind);
            Vec::new()
        } else {
            vec![Diagnostic::unexpected(token.kind, any_of)]
        };
        self.acc.leaf(token.kind, token.start, token.end, diagnostics);
        self.tokens.advance();
        Ok(token.kind)
    }

    fn is_stashed(&self, kind: TokenKind) -> bool {
        self.stash.contains(&kind)
    }
}
