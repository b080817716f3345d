use crate::{
    lexer::{Span, Token, TokenKind},
    parser::{FromTokens, ParseError, ParseState},
};

/// Leaf node for a name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Identifier {
    pub spelling: String,
    pub position: Span,
}

impl FromTokens for Identifier {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        match tokens.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                tokens.next();
                Ok(Identifier {
                    spelling: token.spelling,
                    position: token.position,
                })
            }
            Some(token) => Err(ParseError {
                message: "identifier expected here".into(),
                position: Some(token.position),
            }),
            None => Err(ParseError::eof("an identifier")),
        }
    }
}

/// Leaf node for an operator symbol.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Operator {
    pub spelling: String,
    pub position: Span,
}

impl FromTokens for Operator {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        match tokens.peek() {
            Some(token) if token.kind == TokenKind::Operator => {
                tokens.next();
                Ok(Operator {
                    spelling: token.spelling,
                    position: token.position,
                })
            }
            Some(token) => Err(ParseError {
                message: "operator expected here".into(),
                position: Some(token.position),
            }),
            None => Err(ParseError::eof("an operator")),
        }
    }
}

/// Leaf node for an integer literal, kept as its spelling.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IntegerLiteral {
    pub spelling: String,
    pub position: Span,
}

impl FromTokens for IntegerLiteral {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        match tokens.peek() {
            Some(token) if token.kind == TokenKind::IntLiteral => {
                tokens.next();
                Ok(IntegerLiteral {
                    spelling: token.spelling,
                    position: token.position,
                })
            }
            Some(token) => Err(ParseError {
                message: "integer literal expected here".into(),
                position: Some(token.position),
            }),
            None => Err(ParseError::eof("an integer literal")),
        }
    }
}

/// Leaf node for a character literal, kept as its quoted spelling.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CharacterLiteral {
    pub spelling: String,
    pub position: Span,
}

impl FromTokens for CharacterLiteral {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        match tokens.peek() {
            Some(token) if token.kind == TokenKind::CharLiteral => {
                tokens.next();
                Ok(CharacterLiteral {
                    spelling: token.spelling,
                    position: token.position,
                })
            }
            Some(token) => Err(ParseError {
                message: "character literal expected here".into(),
                position: Some(token.position),
            }),
            None => Err(ParseError::eof("a character literal")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;

    use super::*;

    #[test]
    fn test_parse_identifier() {
        let mut tokens = Lexer::new("answer").lex().expect("should work").into();

        assert_eq!(
            Identifier::parse(&mut tokens),
            Ok(Identifier {
                spelling: "answer".into(),
                position: Span::default(),
            })
        );
    }

    #[test]
    fn test_error_on_keyword_as_identifier() {
        let mut tokens = Lexer::new("while").lex().expect("should work").into();

        assert!(Identifier::parse(&mut tokens).is_err());
    }

    #[test]
    fn test_parse_operator() {
        let mut tokens = Lexer::new("<=").lex().expect("should work").into();

        assert_eq!(
            Operator::parse(&mut tokens),
            Ok(Operator {
                spelling: "<=".into(),
                position: Span::default(),
            })
        );
    }

    #[test]
    fn test_parse_integer_literal_keeps_spelling() {
        let mut tokens = Lexer::new("007").lex().expect("should work").into();

        assert_eq!(
            IntegerLiteral::parse(&mut tokens),
            Ok(IntegerLiteral {
                spelling: "007".into(),
                position: Span::default(),
            })
        );
    }

    #[test]
    fn test_parse_character_literal_keeps_quotes() {
        let mut tokens = Lexer::new("'a'").lex().expect("should work").into();

        assert_eq!(
            CharacterLiteral::parse(&mut tokens),
            Ok(CharacterLiteral {
                spelling: "'a'".into(),
                position: Span::default(),
            })
        );
    }

    #[test]
    fn test_error_on_eof() {
        let mut tokens: ParseState<Token> = ParseState::new(vec![]);

        assert!(Identifier::parse(&mut tokens).is_err());
    }
}
