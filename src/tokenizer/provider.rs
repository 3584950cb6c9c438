use super::token::{Token, TokenKind};
use super::Tokenizer;

/// Pull cursor over a token stream, as seen by the parser.
///
/// `current` is `None` once the stream is exhausted; `advance` past the end
/// does nothing.
pub trait TokenProvider {
    fn current(&self) -> Option<Token>;

    fn advance(&mut self);

    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    fn current_start(&self) -> Option<usize> {
        self.current().map(|t| t.start)
    }

    fn current_end(&self) -> Option<usize> {
        self.current().map(|t| t.end)
    }
}

impl TokenProvider for Tokenizer<'_> {
    fn current(&self) -> Option<Token> {
        Tokenizer::current(self)
    }

    fn advance(&mut self) {
        Tokenizer::advance(self)
    }
}

impl<P: TokenProvider + ?Sized> TokenProvider for &mut P {
    fn current(&self) -> Option<Token> {
        (**self).current()
    }

    fn advance(&mut self) {
        (**self).advance()
    }
}

/// A provider over an already built token list.
#[derive(Debug, Default, Clone)]
pub struct ListTokenProvider {
    tokens: Vec<Token>,
    position: usize,
}

impl ListTokenProvider {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn remaining(&self) -> &[Token] {
        self.tokens.get(self.position..).unwrap_or_default()
    }
}

impl From<Vec<Token>> for ListTokenProvider {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl FromIterator<Token> for ListTokenProvider {
    fn from_iter<T: IntoIterator<Item = Token>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl TokenProvider for ListTokenProvider {
    fn current(&self) -> Option<Token> {
        self.tokens.get(self.position).copied()
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_provider() {
        let mut tokens = ListTokenProvider::new(vec![
            Token::new(TokenKind::BlockScriptletOpen, 0, 2),
            Token::new(TokenKind::ScriptletClose, 2, 4),
        ]);

        assert_eq!(tokens.current_kind(), Some(TokenKind::BlockScriptletOpen));
        assert_eq!(tokens.current_start(), Some(0));
        assert_eq!(tokens.current_end(), Some(2));

        tokens.advance();
        assert_eq!(tokens.current_kind(), Some(TokenKind::ScriptletClose));
        assert_eq!(tokens.remaining().len(), 1);

        tokens.advance();
        assert_eq!(tokens.current(), None);
        tokens.advance();
        tokens.advance();
        assert_eq!(tokens.current(), None);
        assert!(tokens.remaining().is_empty());
    }

    #[test]
    fn test_tokenizer_provider() {
        let mut tokenizer = Tokenizer::new("$a");
        let provider: &mut dyn TokenProvider = &mut tokenizer;

        assert_eq!(
            provider.current_kind(),
            Some(TokenKind::DollarReferenceDollar)
        );
        provider.advance();
        assert_eq!(provider.current_kind(), Some(TokenKind::DollarReferenceBody));
        assert_eq!(provider.current_end(), Some(2));
        provider.advance();
        assert_eq!(provider.current_kind(), None);
        provider.advance();
        assert_eq!(provider.current_kind(), None);
    }
}
