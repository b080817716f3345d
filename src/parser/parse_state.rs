use crate::lexer::{Span, Token, TokenKind};
use crate::parser::ParseError;

/// Struct for iterating over a vector of tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseState<T> {
    tokens: Vec<T>,
    index: usize,
    pub errors: Vec<ParseError>,
}

impl<T> Iterator for ParseState<T>
where
    T: Clone + core::fmt::Debug,
{
    type Item = T;

    /// Get the next item (if present).
    fn next(&mut self) -> Option<T> {
        if self.index < self.tokens.len() {
            let item = self.tokens.get(self.index).cloned();
            self.index += 1;
            return item;
        }

        None
    }
}

impl<T> ParseState<T>
where
    T: Clone,
{
    pub fn new(tokens: Vec<T>) -> Self {
        Self {
            tokens,
            index: 0,
            errors: vec![],
        }
    }

    /// Peek at the next item.
    pub fn peek(&self) -> Option<T> {
        self.tokens.get(self.index).cloned()
    }

    /// Peek at the most recently consumed item.
    pub fn peek_reverse(&self) -> Option<T> {
        if self.index > 0 {
            return self.tokens.get(self.index - 1).cloned();
        }

        None
    }

    pub fn add_error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn last_token(&self) -> Option<T> {
        self.tokens.last().cloned()
    }
}

impl<T> From<Vec<T>> for ParseState<T>
where
    T: Clone,
{
    fn from(value: Vec<T>) -> Self {
        Self::new(value)
    }
}

impl ParseState<Token> {
    /// Kind of the current token; `Eot` once the stream is exhausted.
    pub fn peek_kind(&self) -> TokenKind {
        self.peek().map(|token| token.kind).unwrap_or(TokenKind::Eot)
    }

    /// Span of the current token, where the next phrase would start.
    pub fn position(&self) -> Span {
        self.peek()
            .or_else(|| self.last_token())
            .map(|token| token.position)
            .unwrap_or_default()
    }

    /// Span of the most recently consumed token, where a finished phrase ends.
    pub fn previous_position(&self) -> Span {
        self.peek_reverse()
            .map(|token| token.position)
            .unwrap_or_default()
    }

    /// Consume the current token if it has the expected kind.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.next();
                Ok(token)
            }
            Some(token) => Err(ParseError {
                message: format!("\"{}\" expected here", kind.spelling()),
                position: Some(token.position),
            }),
            None => Err(ParseError::eof(kind.spelling())),
        }
    }

    /// Error for a token that no production of `category` can begin with.
    pub fn cannot_start(&self, category: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError {
                message: format!("\"{}\" cannot start {category}", token.spelling),
                position: Some(token.position),
            },
            None => ParseError::eof(category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    #[test]
    fn test_expect_consumes_matching_token() {
        let tokens = Lexer::new("begin end").lex().expect("should work");
        let mut tokens = ParseState::new(tokens);

        assert!(tokens.expect(TokenKind::Begin).is_ok());
        assert_eq!(tokens.peek_kind(), TokenKind::End);
    }

    #[test]
    fn test_expect_reports_canonical_spelling() {
        let tokens = Lexer::new("begin").lex().expect("should work");
        let mut tokens = ParseState::new(tokens);

        let result = tokens.expect(TokenKind::End);
        assert_eq!(
            result,
            Err(ParseError {
                message: "\"end\" expected here".into(),
                position: Some(Span::default()),
            })
        );
        assert_eq!(tokens.peek_kind(), TokenKind::Begin);
    }

    #[test]
    fn test_positions_follow_the_cursor() {
        let tokens = Lexer::new("x := 1").lex().expect("should work");
        let mut tokens = ParseState::new(tokens);

        assert_eq!(ParseState::position(&tokens).start, 0);
        tokens.next();
        assert_eq!(ParseState::position(&tokens).start, 2);
        assert_eq!(tokens.previous_position().end, 1);
    }

    #[test]
    fn test_peek_kind_is_eot_on_exhausted_stream() {
        let mut tokens: ParseState<Token> = ParseState::new(vec![]);

        assert_eq!(tokens.peek_kind(), TokenKind::Eot);
        assert_eq!(tokens.next(), None);
    }
}
