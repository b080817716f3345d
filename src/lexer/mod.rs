mod token;

pub use self::token::*;

use std::{error::Error, fmt::Display, iter::Peekable, str::Chars};

use unescape::unescape;

/// Characters that may make up an operator lexeme.
const OPERATOR_CHARS: &str = "+-*/=<>\\&@%^?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub offset: usize,
}

impl LexError {
    fn new(message: impl ToString, offset: usize) -> Self {
        LexError {
            message: message.to_string(),
            offset,
        }
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.offset)
    }
}

impl Error for LexError {}

pub type LexResult<T> = Result<T, LexError>;

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    tokens: Vec<Token>,
    iterator: Peekable<Chars<'a>>,
    offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iterator = input.chars().peekable();

        Self {
            tokens: vec![],
            iterator,
            offset: 0,
        }
    }

    fn peek(&mut self) -> Option<&char> {
        self.iterator.peek()
    }

    fn next(&mut self) -> Option<char> {
        let item = self.iterator.next();
        if let Some(item) = item {
            self.offset += item.len_utf8();
        }
        item
    }

    fn next_if(&mut self, func: impl FnOnce(&char) -> bool) -> Option<char> {
        let item = self.iterator.next_if(func);
        if let Some(item) = item {
            self.offset += item.len_utf8();
        }
        item
    }

    /// Skip whitespace and `!` line comments.
    fn eat_blank(&mut self) {
        loop {
            while self.next_if(|item| item.is_whitespace()).is_some() {}

            if self.peek() == Some(&'!') {
                while let Some(next) = self.next() {
                    if next == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Tokenize the whole input. The returned stream always ends in a single
    /// end-of-text token whose span is the zero-width end of the source.
    pub fn lex(mut self) -> LexResult<Vec<Token>> {
        loop {
            self.eat_blank();

            let Some(next) = self.peek() else {
                break;
            };

            match next {
                'a'..='z' | 'A'..='Z' => self.lex_word(),
                '0'..='9' => self.lex_number(),
                '\'' => self.lex_character()?,
                c if OPERATOR_CHARS.contains(*c) => self.lex_operator(),
                _ => self.lex_punctuation()?,
            }
        }

        self.tokens.push(Token {
            kind: TokenKind::Eot,
            spelling: String::new(),
            position: Span::empty_at(self.offset),
        });

        Ok(self.tokens)
    }

    fn lex_word(&mut self) {
        let start = self.offset;
        let mut stack = vec![];

        while let Some(next) = self.next_if(|item| item.is_ascii_alphanumeric()) {
            stack.push(next);
        }

        let spelling = stack.iter().collect::<String>();
        let kind = TokenKind::keyword(&spelling).unwrap_or(TokenKind::Identifier);

        self.tokens.push(Token {
            kind,
            spelling,
            position: Span {
                start,
                end: self.offset,
            },
        });
    }

    fn lex_number(&mut self) {
        let start = self.offset;
        let mut stack = vec![];

        while let Some(next) = self.next_if(|item| item.is_ascii_digit()) {
            stack.push(next);
        }

        self.tokens.push(Token {
            kind: TokenKind::IntLiteral,
            spelling: stack.iter().collect(),
            position: Span {
                start,
                end: self.offset,
            },
        });
    }

    fn lex_operator(&mut self) {
        let start = self.offset;
        let mut stack = vec![];

        while let Some(next) = self.next_if(|item| OPERATOR_CHARS.contains(*item)) {
            stack.push(next);
        }

        self.tokens.push(Token {
            kind: TokenKind::Operator,
            spelling: stack.iter().collect(),
            position: Span {
                start,
                end: self.offset,
            },
        });
    }

    fn lex_character(&mut self) -> LexResult<()> {
        let start = self.offset;
        self.next();

        let inner = match self.next() {
            None | Some('\'') => {
                return Err(LexError::new("empty character literal", start));
            }
            Some('\\') => {
                let Some(escaped) = self.next() else {
                    return Err(LexError::new("unterminated character literal", start));
                };
                format!("\\{escaped}")
            }
            Some(plain) => plain.to_string(),
        };

        if self.next() != Some('\'') {
            return Err(LexError::new("unterminated character literal", start));
        }

        let valid = unescape(&inner)
            .map(|unescaped| unescaped.chars().count() == 1)
            .unwrap_or(false);
        if !valid {
            return Err(LexError::new(
                format!("invalid character literal '{inner}'"),
                start,
            ));
        }

        self.tokens.push(Token {
            kind: TokenKind::CharLiteral,
            spelling: format!("'{inner}'"),
            position: Span {
                start,
                end: self.offset,
            },
        });

        Ok(())
    }

    fn lex_punctuation(&mut self) -> LexResult<()> {
        let start = self.offset;
        let Some(next) = self.next() else {
            return Ok(());
        };

        let kind = match next {
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LCurly,
            '}' => TokenKind::RCurly,
            ':' => {
                if self.next_if(|item| *item == '=').is_some() {
                    TokenKind::Becomes
                } else {
                    TokenKind::Colon
                }
            }
            other => {
                return Err(LexError::new(format!("failed to lex '{other}'"), start));
            }
        };

        self.tokens.push(Token {
            kind,
            spelling: kind.spelling().into(),
            position: Span {
                start,
                end: self.offset,
            },
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, spelling: &str) -> Token {
        Token {
            kind,
            spelling: spelling.into(),
            position: Span::default(),
        }
    }

    #[test]
    fn test_lex_empty_input() {
        let tokens = Lexer::new("").lex();

        assert_eq!(Ok(vec![token(TokenKind::Eot, "")]), tokens);
    }

    #[test]
    fn test_lex_keywords_and_identifiers() {
        let tokens = Lexer::new("while whilst While").lex();

        assert_eq!(
            Ok(vec![
                token(TokenKind::While, "while"),
                token(TokenKind::Identifier, "whilst"),
                token(TokenKind::Identifier, "While"),
                token(TokenKind::Eot, ""),
            ]),
            tokens
        );
    }

    #[test]
    fn test_lex_assignment() {
        let tokens = Lexer::new("n := n + 1").lex();

        assert_eq!(
            Ok(vec![
                token(TokenKind::Identifier, "n"),
                token(TokenKind::Becomes, ":="),
                token(TokenKind::Identifier, "n"),
                token(TokenKind::Operator, "+"),
                token(TokenKind::IntLiteral, "1"),
                token(TokenKind::Eot, ""),
            ]),
            tokens
        );
    }

    #[test]
    fn test_lex_colon_alone() {
        let tokens = Lexer::new("x: T").lex();

        assert_eq!(
            Ok(vec![
                token(TokenKind::Identifier, "x"),
                token(TokenKind::Colon, ":"),
                token(TokenKind::Identifier, "T"),
                token(TokenKind::Eot, ""),
            ]),
            tokens
        );
    }

    #[test]
    fn test_lex_multi_character_operator() {
        let tokens = Lexer::new("a <= b").lex();

        assert_eq!(
            Ok(vec![
                token(TokenKind::Identifier, "a"),
                token(TokenKind::Operator, "<="),
                token(TokenKind::Identifier, "b"),
                token(TokenKind::Eot, ""),
            ]),
            tokens
        );
    }

    #[test]
    fn test_lex_character_literal() {
        let tokens = Lexer::new("'a' '\\n'").lex();

        assert_eq!(
            Ok(vec![
                token(TokenKind::CharLiteral, "'a'"),
                token(TokenKind::CharLiteral, "'\\n'"),
                token(TokenKind::Eot, ""),
            ]),
            tokens
        );
    }

    #[test]
    fn test_lex_comment() {
        let tokens = Lexer::new("x ! everything up to the line break\ny").lex();

        assert_eq!(
            Ok(vec![
                token(TokenKind::Identifier, "x"),
                token(TokenKind::Identifier, "y"),
                token(TokenKind::Eot, ""),
            ]),
            tokens
        );
    }

    #[test]
    fn test_lex_spans() {
        let tokens = Lexer::new("x := 10").lex().expect("should work");

        assert_eq!((tokens[0].position.start, tokens[0].position.end), (0, 1));
        assert_eq!((tokens[1].position.start, tokens[1].position.end), (2, 4));
        assert_eq!((tokens[2].position.start, tokens[2].position.end), (5, 7));
        assert_eq!((tokens[3].position.start, tokens[3].position.end), (7, 7));
    }

    #[test]
    fn test_lex_error_on_unknown_character() {
        assert!(Lexer::new("x := #").lex().is_err());
    }

    #[test]
    fn test_lex_error_on_bad_character_literal() {
        assert!(Lexer::new("''").lex().is_err());
        assert!(Lexer::new("'ab'").lex().is_err());
        assert!(Lexer::new("'a").lex().is_err());
    }
}
