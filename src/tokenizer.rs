mod dollar_scriptlet;
pub mod patterns;
mod provider;
mod token;

use crate::result::ParseResult;

pub use self::provider::{ListTokenProvider, TokenProvider};
pub use self::token::{LexState, Token, TokenKind};

/// Finite-state tokenizer for template source.
///
/// Exactly one token is buffered at a time. The tokenizer never fails: when
/// no pattern of the current state matches, the stream is simply exhausted
/// and [`Tokenizer::current`] returns `None`.
#[derive(Debug, Clone)]
pub struct Tokenizer<'src> {
    input: &'src str,
    end: usize,
    position: usize,
    state: LexState,
    current: Option<Token>,
    current_state: LexState,
}

impl<'src> Tokenizer<'src> {
    /// Tokenize all of `input`, starting in [`LexState::Text`].
    pub fn new(input: &'src str) -> Self {
        Self::start(input, 0, input.len(), LexState::Text)
    }

    /// Tokenize `input[start..end]` starting in `initial_state`. Offsets of
    /// the produced tokens are relative to the whole `input`.
    ///
    /// Offsets are clamped to the input and moved onto char boundaries.
    pub fn start(input: &'src str, start: usize, end: usize, initial_state: LexState) -> Self {
        let end = floor_char_boundary(input, end.min(input.len()));
        let start = floor_char_boundary(input, start.min(end));

        let mut tokenizer = Self {
            input,
            end,
            position: start,
            state: initial_state,
            current: None,
            current_state: initial_state,
        };
        tokenizer.pull();
        tokenizer
    }

    pub fn input(&self) -> &'src str {
        self.input
    }

    pub fn current(&self) -> Option<Token> {
        self.current
    }

    pub fn current_kind(&self) -> Option<TokenKind> {
        self.current.map(|t| t.kind)
    }

    pub fn current_start(&self) -> Option<usize> {
        self.current.map(|t| t.start)
    }

    pub fn current_end(&self) -> Option<usize> {
        self.current.map(|t| t.end)
    }

    /// The state the current token was lexed in.
    pub fn current_state(&self) -> LexState {
        self.current_state
    }

    pub fn advance(&mut self) {
        if let Some(token) = self.current {
            self.position = token.end;
            self.pull();
        }
    }

    fn pull(&mut self) {
        self.current_state = self.state;
        let input = self.input;
        let rest = &input[self.position..self.end];
        self.current = self.lex(rest);

        match self.current {
            Some(token) => log::trace!("{} in state {}", token, self.current_state),
            None => log::trace!(
                "exhausted at {} in state {}",
                self.position,
                self.current_state
            ),
        }
    }

    fn emit(&mut self, kind: TokenKind, len: usize, next: LexState) -> Option<Token> {
        self.state = next;
        Some(Token::new(kind, self.position, self.position + len))
    }

    fn lex(&mut self, rest: &str) -> Option<Token> {
        use patterns::*;

        match self.state {
            LexState::Text => {
                if let Some(len) = matched(text(rest)) {
                    self.emit(TokenKind::Text, len, LexState::Text)
                } else if let Some(len) = matched(dollar_reference_dollar(rest)) {
                    self.emit(
                        TokenKind::DollarReferenceDollar,
                        len,
                        LexState::DollarReferenceBody,
                    )
                } else if let Some(len) = matched(block_scriptlet_open(rest)) {
                    self.emit(TokenKind::BlockScriptletOpen, len, LexState::ScriptletBody)
                } else if let Some(len) = matched(expression_scriptlet_open(rest)) {
                    self.emit(
                        TokenKind::ExpressionScriptletOpen,
                        len,
                        LexState::ScriptletBody,
                    )
                } else if let Some(len) = matched(import_block_open(rest)) {
                    self.emit(TokenKind::ImportBlockOpen, len, LexState::ImportBlockBody)
                } else if let Some(len) = matched(dollar_scriptlet_open(rest)) {
                    self.emit(
                        TokenKind::DollarScriptletOpen,
                        len,
                        LexState::DollarScriptletBody,
                    )
                } else {
                    None
                }
            }
            LexState::DollarReferenceBody => {
                let len = matched(dollar_reference_body(rest))?;
                self.emit(TokenKind::DollarReferenceBody, len, LexState::Text)
            }
            LexState::ScriptletBody => {
                if let Some(len) = matched(scriptlet_body(rest)) {
                    self.emit(TokenKind::ScriptletBody, len, LexState::ScriptletClose)
                } else {
                    self.scriptlet_close(rest)
                }
            }
            LexState::ScriptletClose => self.scriptlet_close(rest),
            LexState::ImportBlockBody => {
                if let Some(len) = matched(scriptlet_body(rest)) {
                    self.emit(TokenKind::ImportBlockBody, len, LexState::ImportBlockClose)
                } else {
                    self.import_block_close(rest)
                }
            }
            LexState::ImportBlockClose => self.import_block_close(rest),
            LexState::DollarScriptletBody => match matched(dollar_scriptlet_body(rest)) {
                Some(len) if len > 0 => self.emit(
                    TokenKind::DollarScriptletBody,
                    len,
                    LexState::DollarScriptletClose,
                ),
                _ => self.dollar_scriptlet_close(rest),
            },
            LexState::DollarScriptletClose => self.dollar_scriptlet_close(rest),
        }
    }

    fn scriptlet_close(&mut self, rest: &str) -> Option<Token> {
        let len = matched(patterns::scriptlet_close(rest))?;
        self.emit(TokenKind::ScriptletClose, len, LexState::Text)
    }

    fn import_block_close(&mut self, rest: &str) -> Option<Token> {
        let len = matched(patterns::scriptlet_close(rest))?;
        self.emit(TokenKind::ImportBlockClose, len, LexState::Text)
    }

    fn dollar_scriptlet_close(&mut self, rest: &str) -> Option<Token> {
        let len = matched(patterns::dollar_scriptlet_close(rest))?;
        self.emit(TokenKind::DollarScriptletClose, len, LexState::Text)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.current?;
        self.advance();
        Some(token)
    }
}

fn matched(result: ParseResult<&str, &str>) -> Option<usize> {
    result.ok().map(|(_, m)| m.len())
}

fn floor_char_boundary(input: &str, mut index: usize) -> usize {
    while !input.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Every token of `source`, in order.
pub fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::new(source).collect()
}

/// Every token of `source[start..end]` lexed from `initial_state`.
pub fn tokenize_range(
    source: &str,
    start: usize,
    end: usize,
    initial_state: LexState,
) -> Vec<Token> {
    Tokenizer::start(source, start, end, initial_state).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn assert_tokens(input: &str, expected: &[(TokenKind, usize, usize)]) {
        let expected: Vec<Token> = expected
            .iter()
            .map(|&(kind, start, end)| Token::new(kind, start, end))
            .collect();
        assert_eq!(tokenize(input), expected, "tokens of {:?}", input);
    }

    #[test]
    fn test_text() {
        assert_tokens("Hello, World!", &[(Text, 0, 13)]);
        assert_tokens("<html lang=\"en\">", &[(Text, 0, 16)]);
        assert_tokens("\n", &[(Text, 0, 1)]);
        assert_tokens("\n\n", &[(Text, 0, 2)]);
        assert_tokens("", &[]);
    }

    #[test]
    fn test_dollar_reference() {
        assert_tokens("$a", &[(DollarReferenceDollar, 0, 1), (DollarReferenceBody, 1, 2)]);
        assert_tokens(
            "$a.b.c",
            &[(DollarReferenceDollar, 0, 1), (DollarReferenceBody, 1, 6)],
        );
        assert_tokens(
            "$greeting, world!",
            &[
                (DollarReferenceDollar, 0, 1),
                (DollarReferenceBody, 1, 9),
                (Text, 9, 17),
            ],
        );
        assert_tokens(
            "$a.",
            &[
                (DollarReferenceDollar, 0, 1),
                (DollarReferenceBody, 1, 2),
                (Text, 2, 3),
            ],
        );
    }

    #[test]
    fn test_lone_dollar_is_text() {
        assert_tokens("$", &[(Text, 0, 1)]);
        assert_tokens("$ 5", &[(Text, 0, 3)]);
        assert_tokens(r"\$name", &[(Text, 0, 6)]);
    }

    #[test]
    fn test_block_scriptlet() {
        assert_tokens("<%%>", &[(BlockScriptletOpen, 0, 2), (ScriptletClose, 2, 4)]);
        assert_tokens(
            "<% %>",
            &[
                (BlockScriptletOpen, 0, 2),
                (ScriptletBody, 2, 3),
                (ScriptletClose, 3, 5),
            ],
        );
        assert_tokens(
            "<% out << 'Hello, World!' %>",
            &[
                (BlockScriptletOpen, 0, 2),
                (ScriptletBody, 2, 26),
                (ScriptletClose, 26, 28),
            ],
        );
    }

    #[test]
    fn test_expression_scriptlet() {
        assert_tokens(
            "<%=%>",
            &[(ExpressionScriptletOpen, 0, 3), (ScriptletClose, 3, 5)],
        );
        assert_tokens(
            "<%= 'Hello, World!' %>",
            &[
                (ExpressionScriptletOpen, 0, 3),
                (ScriptletBody, 3, 20),
                (ScriptletClose, 20, 22),
            ],
        );
    }

    #[test]
    fn test_unclosed_scriptlets() {
        assert_tokens("<%", &[(BlockScriptletOpen, 0, 2)]);
        assert_tokens("<%=", &[(ExpressionScriptletOpen, 0, 3)]);
        assert_tokens("<% ", &[(BlockScriptletOpen, 0, 2), (ScriptletBody, 2, 3)]);
        assert_tokens(
            "<%= ",
            &[(ExpressionScriptletOpen, 0, 3), (ScriptletBody, 3, 4)],
        );
    }

    #[test]
    fn test_import_block() {
        assert_tokens("<%@%>", &[(ImportBlockOpen, 0, 3), (ImportBlockClose, 3, 5)]);
        assert_tokens(
            "<%@ %>",
            &[
                (ImportBlockOpen, 0, 3),
                (ImportBlockBody, 3, 4),
                (ImportBlockClose, 4, 6),
            ],
        );
        assert_tokens("<%@", &[(ImportBlockOpen, 0, 3)]);
        assert_tokens("<%@ ", &[(ImportBlockOpen, 0, 3), (ImportBlockBody, 3, 4)]);
    }

    #[test]
    fn test_dollar_scriptlet() {
        assert_tokens(
            "${}",
            &[(DollarScriptletOpen, 0, 2), (DollarScriptletClose, 2, 3)],
        );
        assert_tokens(
            "${ }",
            &[
                (DollarScriptletOpen, 0, 2),
                (DollarScriptletBody, 2, 3),
                (DollarScriptletClose, 3, 4),
            ],
        );
        assert_tokens(
            "${ { } }",
            &[
                (DollarScriptletOpen, 0, 2),
                (DollarScriptletBody, 2, 7),
                (DollarScriptletClose, 7, 8),
            ],
        );
        assert_tokens(
            "${ \"\" }",
            &[
                (DollarScriptletOpen, 0, 2),
                (DollarScriptletBody, 2, 6),
                (DollarScriptletClose, 6, 7),
            ],
        );
        assert_tokens(
            "${ \"${ test() }\" }",
            &[
                (DollarScriptletOpen, 0, 2),
                (DollarScriptletBody, 2, 17),
                (DollarScriptletClose, 17, 18),
            ],
        );
        assert_tokens(
            "${ \"${ f({a:1}) }\" }",
            &[
                (DollarScriptletOpen, 0, 2),
                (DollarScriptletBody, 2, 19),
                (DollarScriptletClose, 19, 20),
            ],
        );
    }

    #[test]
    fn test_unclosed_dollar_scriptlet() {
        assert_tokens("${", &[(DollarScriptletOpen, 0, 2)]);
        assert_tokens(
            "${ ",
            &[(DollarScriptletOpen, 0, 2), (DollarScriptletBody, 2, 3)],
        );
    }

    #[test]
    fn test_mixed() {
        let source = "Hi $user.name, <% if (x) { %>${x}<% } %>!";
        assert_tokens(
            source,
            &[
                (Text, 0, 3),
                (DollarReferenceDollar, 3, 4),
                (DollarReferenceBody, 4, 13),
                (Text, 13, 15),
                (BlockScriptletOpen, 15, 17),
                (ScriptletBody, 17, 27),
                (ScriptletClose, 27, 29),
                (DollarScriptletOpen, 29, 31),
                (DollarScriptletBody, 31, 32),
                (DollarScriptletClose, 32, 33),
                (BlockScriptletOpen, 33, 35),
                (ScriptletBody, 35, 38),
                (ScriptletClose, 38, 40),
                (Text, 40, 41),
            ],
        );
    }

    #[test]
    fn test_current_state() {
        let mut tokenizer = Tokenizer::new("<% x %>");
        assert_eq!(tokenizer.current_state(), LexState::Text);
        tokenizer.advance();
        assert_eq!(tokenizer.current_state(), LexState::ScriptletBody);
        assert_eq!(tokenizer.current_kind(), Some(ScriptletBody));
        tokenizer.advance();
        assert_eq!(tokenizer.current_state(), LexState::ScriptletClose);
        tokenizer.advance();
        assert_eq!(tokenizer.current(), None);
        tokenizer.advance();
        assert_eq!(tokenizer.current(), None);
    }

    #[test]
    fn test_range() {
        let source = "<% a %> tail";
        assert_eq!(
            tokenize_range(source, 2, 7, LexState::ScriptletBody),
            vec![Token::new(ScriptletBody, 2, 5), Token::new(ScriptletClose, 5, 7)]
        );
        assert_eq!(
            tokenize_range(source, 7, 100, LexState::Text),
            vec![Token::new(Text, 7, 12)]
        );
        // a state with nothing to match
        assert_eq!(tokenize_range(source, 0, 7, LexState::DollarScriptletClose), vec![]);
    }

    #[test]
    fn test_offsets_on_char_boundaries() {
        let source = "测试$a";
        assert_eq!(
            tokenize_range(source, 1, source.len(), LexState::Text),
            tokenize(source)
        );
    }
}
