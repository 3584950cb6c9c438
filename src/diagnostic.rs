use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tokenizer::TokenKind;

/// What a [`Diagnostic`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiagnosticKind {
    /// A token of the wrong kind was found.
    UnexpectedToken { found: TokenKind },
    /// The token stream ended inside a construct.
    OutOfTokens,
    /// A well-formed import block under a dialect that forbids them.
    ImportBlockNotPermitted,
    Custom,
}

/// A recoverable problem attached to a node of the tree.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    message: String,
    kind: DiagnosticKind,
    /// Kinds that would have been accepted, in grammar order.
    expected: Vec<TokenKind>,
    #[cfg_attr(feature = "serde", serde(skip))]
    cause: Option<Arc<anyhow::Error>>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: DiagnosticKind::Custom,
            expected: Vec::new(),
            cause: None,
        }
    }

    pub fn with_cause(message: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        Self {
            cause: Some(Arc::new(cause.into())),
            ..Self::new(message)
        }
    }

    pub fn unexpected(found: TokenKind, expected: &[TokenKind]) -> Self {
        Self {
            message: expectation_message(&format!("unexpected token: {found}"), expected),
            kind: DiagnosticKind::UnexpectedToken { found },
            expected: expected.to_vec(),
            cause: None,
        }
    }

    pub fn out_of_tokens(expected: &[TokenKind]) -> Self {
        Self {
            message: expectation_message("ran out of tokens", expected),
            kind: DiagnosticKind::OutOfTokens,
            expected: expected.to_vec(),
            cause: None,
        }
    }

    pub fn import_block_not_permitted(dialect: &str) -> Self {
        Self {
            message: format!("import blocks are not permitted by the {dialect} dialect."),
            kind: DiagnosticKind::ImportBlockNotPermitted,
            expected: Vec::new(),
            cause: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn expected(&self) -> &[TokenKind] {
        &self.expected
    }

    pub fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_deref()
    }
}

impl PartialEq for Diagnostic {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
            && self.kind == other.kind
            && self.expected == other.expected
            && self.cause.as_ref().map(|c| c.to_string())
                == other.cause.as_ref().map(|c| c.to_string())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, " (caused by: {cause})")?;
        }
        Ok(())
    }
}

fn expectation_message(prefix: &str, expected: &[TokenKind]) -> String {
    match expected {
        [] => format!("{prefix}."),
        [only] => format!("{prefix}; expected {only}."),
        many => {
            let names: Vec<&str> = many.iter().map(TokenKind::as_str).collect();
            format!("{prefix}; expected any of {}.", names.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Diagnostic::out_of_tokens(&[TokenKind::ScriptletBody, TokenKind::ScriptletClose])
                .message(),
            "ran out of tokens; expected any of SCRIPTLET_BODY, SCRIPTLET_CLOSE."
        );
        assert_eq!(
            Diagnostic::unexpected(TokenKind::Text, &[TokenKind::ScriptletClose]).message(),
            "unexpected token: TEXT; expected SCRIPTLET_CLOSE."
        );
        assert_eq!(
            Diagnostic::out_of_tokens(&[]).message(),
            "ran out of tokens."
        );
        assert_eq!(
            Diagnostic::import_block_not_permitted("standard").message(),
            "import blocks are not permitted by the standard dialect."
        );
    }

    #[test]
    fn test_kind_and_expected() {
        let d = Diagnostic::unexpected(
            TokenKind::Text,
            &[TokenKind::DollarScriptletBody, TokenKind::DollarScriptletClose],
        );
        assert_eq!(
            d.kind(),
            DiagnosticKind::UnexpectedToken {
                found: TokenKind::Text
            }
        );
        assert_eq!(
            d.expected(),
            &[TokenKind::DollarScriptletBody, TokenKind::DollarScriptletClose]
        );
        assert!(d.cause().is_none());
    }

    #[test]
    fn test_cause() {
        let d = Diagnostic::with_cause("could not read include", anyhow::anyhow!("no such file"));
        assert_eq!(d.kind(), DiagnosticKind::Custom);
        assert_eq!(d.cause().map(|c| c.to_string()), Some("no such file".to_string()));
        assert_eq!(
            d.to_string(),
            "could not read include (caused by: no such file)"
        );
        assert_eq!(d.clone(), d);
        assert_ne!(d, Diagnostic::new("could not read include"));
    }
}
