use crate::{
    lexer::{Span, Token, TokenKind},
    parser::{FromTokens, ParseError, ParseState},
};

use super::{Identifier, IntegerLiteral};

/// Syntactic form naming a type: a type identifier, `array N of T`, or
/// `record f: T, ... end`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TypeDenoter {
    Simple {
        identifier: Identifier,
        position: Span,
    },
    Array {
        size: IntegerLiteral,
        element: Box<TypeDenoter>,
        position: Span,
    },
    Record {
        fields: FieldTypeDenoter,
        position: Span,
    },
}

impl TypeDenoter {
    pub fn position(&self) -> Span {
        match self {
            TypeDenoter::Simple { position, .. }
            | TypeDenoter::Array { position, .. }
            | TypeDenoter::Record { position, .. } => *position,
        }
    }
}

impl FromTokens for TypeDenoter {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        match tokens.peek_kind() {
            TokenKind::Identifier => {
                let identifier = Identifier::parse(tokens)?;
                Ok(TypeDenoter::Simple {
                    identifier,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::Array => {
                tokens.next();
                let size = IntegerLiteral::parse(tokens)?;
                tokens.expect(TokenKind::Of)?;
                let element = TypeDenoter::parse(tokens)?;
                Ok(TypeDenoter::Array {
                    size,
                    element: Box::new(element),
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::Record => {
                tokens.next();
                let fields = FieldTypeDenoter::parse(tokens)?;
                tokens.expect(TokenKind::End)?;
                Ok(TypeDenoter::Record {
                    fields,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            _ => Err(tokens.cannot_start("a type denoter")),
        }
    }
}

/// The field list of a record type, as a right-associated chain.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FieldTypeDenoter {
    Single {
        identifier: Identifier,
        denoter: Box<TypeDenoter>,
        position: Span,
    },
    Multiple {
        identifier: Identifier,
        denoter: Box<TypeDenoter>,
        rest: Box<FieldTypeDenoter>,
        position: Span,
    },
}

impl FieldTypeDenoter {
    pub fn position(&self) -> Span {
        match self {
            FieldTypeDenoter::Single { position, .. }
            | FieldTypeDenoter::Multiple { position, .. } => *position,
        }
    }
}

impl FromTokens for FieldTypeDenoter {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        let identifier = Identifier::parse(tokens)?;
        tokens.expect(TokenKind::Colon)?;
        let denoter = Box::new(TypeDenoter::parse(tokens)?);

        if tokens.peek_kind() == TokenKind::Comma {
            tokens.next();
            let rest = Box::new(FieldTypeDenoter::parse(tokens)?);
            Ok(FieldTypeDenoter::Multiple {
                identifier,
                denoter,
                rest,
                position: start.merge(&tokens.previous_position()),
            })
        } else {
            Ok(FieldTypeDenoter::Single {
                identifier,
                denoter,
                position: start.merge(&tokens.previous_position()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;

    use super::*;

    fn identifier(spelling: &str) -> Identifier {
        Identifier {
            spelling: spelling.into(),
            position: Span::default(),
        }
    }

    fn simple(spelling: &str) -> TypeDenoter {
        TypeDenoter::Simple {
            identifier: identifier(spelling),
            position: Span::default(),
        }
    }

    #[test]
    fn test_parse_simple() {
        let mut tokens = Lexer::new("Integer").lex().expect("should work").into();

        assert_eq!(TypeDenoter::parse(&mut tokens), Ok(simple("Integer")));
    }

    #[test]
    fn test_parse_nested_array() {
        let mut tokens = Lexer::new("array 8 of array 8 of Char")
            .lex()
            .expect("should work")
            .into();

        assert_eq!(
            TypeDenoter::parse(&mut tokens),
            Ok(TypeDenoter::Array {
                size: IntegerLiteral {
                    spelling: "8".into(),
                    position: Span::default(),
                },
                element: Box::new(TypeDenoter::Array {
                    size: IntegerLiteral {
                        spelling: "8".into(),
                        position: Span::default(),
                    },
                    element: Box::new(simple("Char")),
                    position: Span::default(),
                }),
                position: Span::default(),
            })
        );
    }

    #[test]
    fn test_record_fields_nest_to_the_right() {
        let mut tokens = Lexer::new("record x: Integer, y: Integer end")
            .lex()
            .expect("should work")
            .into();

        assert_eq!(
            TypeDenoter::parse(&mut tokens),
            Ok(TypeDenoter::Record {
                fields: FieldTypeDenoter::Multiple {
                    identifier: identifier("x"),
                    denoter: Box::new(simple("Integer")),
                    rest: Box::new(FieldTypeDenoter::Single {
                        identifier: identifier("y"),
                        denoter: Box::new(simple("Integer")),
                        position: Span::default(),
                    }),
                    position: Span::default(),
                },
                position: Span::default(),
            })
        );
    }

    #[test]
    fn test_record_requires_end() {
        let mut tokens = Lexer::new("record x: Integer")
            .lex()
            .expect("should work")
            .into();

        assert_eq!(
            TypeDenoter::parse(&mut tokens),
            Err(ParseError {
                message: "\"end\" expected here".into(),
                position: Some(Span::default()),
            })
        );
    }

    #[test]
    fn test_error_on_keyword() {
        let mut tokens = Lexer::new("begin").lex().expect("should work").into();

        assert_eq!(
            TypeDenoter::parse(&mut tokens),
            Err(ParseError {
                message: "\"begin\" cannot start a type denoter".into(),
                position: Some(Span::default()),
            })
        );
    }
}
