use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Every kind of token the tokenizer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TokenKind {
    Text,
    DollarReferenceDollar,
    DollarReferenceBody,
    BlockScriptletOpen,
    ExpressionScriptletOpen,
    ScriptletBody,
    ScriptletClose,
    ImportBlockOpen,
    ImportBlockBody,
    ImportBlockClose,
    DollarScriptletOpen,
    DollarScriptletBody,
    DollarScriptletClose,
}

impl TokenKind {
    pub const ALL: [TokenKind; 13] = [
        TokenKind::Text,
        TokenKind::DollarReferenceDollar,
        TokenKind::DollarReferenceBody,
        TokenKind::BlockScriptletOpen,
        TokenKind::ExpressionScriptletOpen,
        TokenKind::ScriptletBody,
        TokenKind::ScriptletClose,
        TokenKind::ImportBlockOpen,
        TokenKind::ImportBlockBody,
        TokenKind::ImportBlockClose,
        TokenKind::DollarScriptletOpen,
        TokenKind::DollarScriptletBody,
        TokenKind::DollarScriptletClose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::DollarReferenceDollar => "DOLLAR_REFERENCE_DOLLAR",
            Self::DollarReferenceBody => "DOLLAR_REFERENCE_BODY",
            Self::BlockScriptletOpen => "BLOCK_SCRIPTLET_OPEN",
            Self::ExpressionScriptletOpen => "EXPRESSION_SCRIPTLET_OPEN",
            Self::ScriptletBody => "SCRIPTLET_BODY",
            Self::ScriptletClose => "SCRIPTLET_CLOSE",
            Self::ImportBlockOpen => "IMPORT_BLOCK_OPEN",
            Self::ImportBlockBody => "IMPORT_BLOCK_BODY",
            Self::ImportBlockClose => "IMPORT_BLOCK_CLOSE",
            Self::DollarScriptletOpen => "DOLLAR_SCRIPTLET_OPEN",
            Self::DollarScriptletBody => "DOLLAR_SCRIPTLET_BODY",
            Self::DollarScriptletClose => "DOLLAR_SCRIPTLET_CLOSE",
        }
    }

    /// Whether this kind opens a delimited construct.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            Self::BlockScriptletOpen
                | Self::ExpressionScriptletOpen
                | Self::ImportBlockOpen
                | Self::DollarScriptletOpen
        )
    }

    pub fn is_close(&self) -> bool {
        matches!(
            self,
            Self::ScriptletClose | Self::ImportBlockClose | Self::DollarScriptletClose
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lexical states of the tokenizer's state machine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum LexState {
    #[default]
    Text,
    DollarReferenceBody,
    ScriptletBody,
    ScriptletClose,
    ImportBlockBody,
    ImportBlockClose,
    DollarScriptletBody,
    DollarScriptletClose,
}

impl LexState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::DollarReferenceBody => "DOLLAR_REFERENCE_BODY",
            Self::ScriptletBody => "SCRIPTLET_BODY",
            Self::ScriptletClose => "SCRIPTLET_CLOSE",
            Self::ImportBlockBody => "IMPORT_BLOCK_BODY",
            Self::ImportBlockClose => "IMPORT_BLOCK_CLOSE",
            Self::DollarScriptletBody => "DOLLAR_SCRIPTLET_BODY",
            Self::DollarScriptletClose => "DOLLAR_SCRIPTLET_CLOSE",
        }
    }
}

impl fmt::Display for LexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A half-open `[start, end)` byte range of the source, tagged with its kind.
///
/// Tokens never own text; use [`Token::text`] with the source they were
/// lexed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The slice of `source` this token covers, or `""` if the span does not
    /// fit `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span()).unwrap_or_default()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}, {})", self.kind, self.start, self.end)
    }
}
