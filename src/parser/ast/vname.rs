use crate::{
    lexer::{Span, Token, TokenKind},
    parser::{FromTokens, ParseError, ParseState},
};

use super::{Expression, Identifier};

/// A value-or-variable name: an identifier, possibly extended by record
/// field and array subscript suffixes. The suffix chain is left-deep, so the
/// outermost suffix is the outermost node.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Vname {
    Simple {
        identifier: Identifier,
        position: Span,
    },
    Dot {
        record: Box<Vname>,
        field: Identifier,
        position: Span,
    },
    Subscript {
        array: Box<Vname>,
        index: Box<Expression>,
        position: Span,
    },
}

impl Vname {
    pub fn position(&self) -> Span {
        match self {
            Vname::Simple { position, .. }
            | Vname::Dot { position, .. }
            | Vname::Subscript { position, .. } => *position,
        }
    }

    /// Extend an already-consumed identifier with `.field` and `[index]`
    /// suffixes, wrapping to the left as the suffixes accumulate.
    pub fn parse_rest(
        identifier: Identifier,
        tokens: &mut ParseState<Token>,
    ) -> Result<Self, ParseError> {
        let start = identifier.position;
        let mut vname = Vname::Simple {
            identifier,
            position: start,
        };

        loop {
            match tokens.peek_kind() {
                TokenKind::Dot => {
                    tokens.next();
                    let field = Identifier::parse(tokens)?;
                    vname = Vname::Dot {
                        record: Box::new(vname),
                        field,
                        position: start.merge(&tokens.previous_position()),
                    };
                }
                TokenKind::LBracket => {
                    tokens.next();
                    let index = Box::new(Expression::parse(tokens)?);
                    tokens.expect(TokenKind::RBracket)?;
                    vname = Vname::Subscript {
                        array: Box::new(vname),
                        index,
                        position: start.merge(&tokens.previous_position()),
                    };
                }
                _ => return Ok(vname),
            }
        }
    }
}

impl FromTokens for Vname {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let identifier = Identifier::parse(tokens)?;
        Vname::parse_rest(identifier, tokens)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::parser::ast::IntegerLiteral;

    use super::*;

    fn identifier(spelling: &str) -> Identifier {
        Identifier {
            spelling: spelling.into(),
            position: Span::default(),
        }
    }

    #[test]
    fn test_parse_simple() {
        let mut tokens = Lexer::new("x").lex().expect("should work").into();

        assert_eq!(
            Vname::parse(&mut tokens),
            Ok(Vname::Simple {
                identifier: identifier("x"),
                position: Span::default(),
            })
        );
    }

    #[test]
    fn test_suffixes_nest_to_the_left() {
        let mut tokens = Lexer::new("x.f[1]").lex().expect("should work").into();

        assert_eq!(
            Vname::parse(&mut tokens),
            Ok(Vname::Subscript {
                array: Box::new(Vname::Dot {
                    record: Box::new(Vname::Simple {
                        identifier: identifier("x"),
                        position: Span::default(),
                    }),
                    field: identifier("f"),
                    position: Span::default(),
                }),
                index: Box::new(Expression::Integer {
                    literal: IntegerLiteral {
                        spelling: "1".into(),
                        position: Span::default(),
                    },
                    position: Span::default(),
                }),
                position: Span::default(),
            })
        );
    }

    #[test]
    fn test_suffix_spans_grow_with_the_phrase() {
        let mut tokens = Lexer::new("x.f[1]").lex().expect("should work").into();

        let vname = Vname::parse(&mut tokens).expect("should work");
        let Vname::Subscript { array, position, .. } = &vname else {
            panic!("expected a subscript vname");
        };

        assert_eq!((position.start, position.end), (0, 6));
        assert_eq!((array.position().start, array.position().end), (0, 3));
    }

    #[test]
    fn test_error_on_unclosed_subscript() {
        let mut tokens = Lexer::new("x[1").lex().expect("should work").into();

        assert!(Vname::parse(&mut tokens).is_err());
    }
}
