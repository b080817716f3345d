use crate::{
    lexer::{Span, Token, TokenKind},
    parser::{FromTokens, ParseError, ParseState},
};

use super::{Identifier, TypeDenoter};

/// A declared parameter together with its passing mode. A bare identifier
/// and `in x: T` both declare a constant (by-value) parameter.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FormalParameter {
    Const {
        identifier: Identifier,
        denoter: TypeDenoter,
        position: Span,
    },
    Var {
        identifier: Identifier,
        denoter: TypeDenoter,
        position: Span,
    },
    Result {
        identifier: Identifier,
        denoter: TypeDenoter,
        position: Span,
    },
    ValueResult {
        identifier: Identifier,
        denoter: TypeDenoter,
        position: Span,
    },
    Proc {
        identifier: Identifier,
        formals: Box<FormalParameterSequence>,
        position: Span,
    },
    Func {
        identifier: Identifier,
        formals: Box<FormalParameterSequence>,
        result: TypeDenoter,
        position: Span,
    },
}

impl FormalParameter {
    pub fn position(&self) -> Span {
        match self {
            FormalParameter::Const { position, .. }
            | FormalParameter::Var { position, .. }
            | FormalParameter::Result { position, .. }
            | FormalParameter::ValueResult { position, .. }
            | FormalParameter::Proc { position, .. }
            | FormalParameter::Func { position, .. } => *position,
        }
    }

    fn parse_typed(
        tokens: &mut ParseState<Token>,
    ) -> Result<(Identifier, TypeDenoter), ParseError> {
        let identifier = Identifier::parse(tokens)?;
        tokens.expect(TokenKind::Colon)?;
        let denoter = TypeDenoter::parse(tokens)?;
        Ok((identifier, denoter))
    }
}

impl FromTokens for FormalParameter {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        match tokens.peek_kind() {
            TokenKind::Identifier => {
                let (identifier, denoter) = FormalParameter::parse_typed(tokens)?;
                Ok(FormalParameter::Const {
                    identifier,
                    denoter,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::In => {
                tokens.next();
                if tokens.peek_kind() == TokenKind::Out {
                    tokens.next();
                    let (identifier, denoter) = FormalParameter::parse_typed(tokens)?;
                    Ok(FormalParameter::ValueResult {
                        identifier,
                        denoter,
                        position: start.merge(&tokens.previous_position()),
                    })
                } else {
                    let (identifier, denoter) = FormalParameter::parse_typed(tokens)?;
                    Ok(FormalParameter::Const {
                        identifier,
                        denoter,
                        position: start.merge(&tokens.previous_position()),
                    })
                }
            }
            TokenKind::Out => {
                tokens.next();
                let (identifier, denoter) = FormalParameter::parse_typed(tokens)?;
                Ok(FormalParameter::Result {
                    identifier,
                    denoter,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::Var => {
                tokens.next();
                let (identifier, denoter) = FormalParameter::parse_typed(tokens)?;
                Ok(FormalParameter::Var {
                    identifier,
                    denoter,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::Proc => {
                tokens.next();
                let identifier = Identifier::parse(tokens)?;
                tokens.expect(TokenKind::LParen)?;
                let formals = FormalParameterSequence::parse(tokens)?;
                tokens.expect(TokenKind::RParen)?;
                Ok(FormalParameter::Proc {
                    identifier,
                    formals: Box::new(formals),
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::Func => {
                tokens.next();
                let identifier = Identifier::parse(tokens)?;
                tokens.expect(TokenKind::LParen)?;
                let formals = FormalParameterSequence::parse(tokens)?;
                tokens.expect(TokenKind::RParen)?;
                tokens.expect(TokenKind::Colon)?;
                let result = TypeDenoter::parse(tokens)?;
                Ok(FormalParameter::Func {
                    identifier,
                    formals: Box::new(formals),
                    result,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            _ => Err(tokens.cannot_start("a formal parameter")),
        }
    }
}

/// The formal parameters of a proc, func or operator declaration, as a
/// right-associated chain.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FormalParameterSequence {
    Empty {
        position: Span,
    },
    Single {
        parameter: FormalParameter,
        position: Span,
    },
    Multiple {
        parameter: FormalParameter,
        rest: Box<FormalParameterSequence>,
        position: Span,
    },
}

impl FormalParameterSequence {
    pub fn position(&self) -> Span {
        match self {
            FormalParameterSequence::Empty { position, .. }
            | FormalParameterSequence::Single { position, .. }
            | FormalParameterSequence::Multiple { position, .. } => *position,
        }
    }

    fn parse_proper(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        let parameter = FormalParameter::parse(tokens)?;
        if tokens.peek_kind() == TokenKind::Comma {
            tokens.next();
            let rest = FormalParameterSequence::parse_proper(tokens)?;
            Ok(FormalParameterSequence::Multiple {
                parameter,
                rest: Box::new(rest),
                position: start.merge(&tokens.previous_position()),
            })
        } else {
            Ok(FormalParameterSequence::Single {
                parameter,
                position: start.merge(&tokens.previous_position()),
            })
        }
    }
}

impl FromTokens for FormalParameterSequence {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        if tokens.peek_kind() == TokenKind::RParen {
            Ok(FormalParameterSequence::Empty {
                position: Span::empty_at(tokens.previous_position().end),
            })
        } else {
            FormalParameterSequence::parse_proper(tokens)
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

    fn integer_type() -> TypeDenoter {
        TypeDenoter::Simple {
            identifier: identifier("Integer"),
            position: Span::default(),
        }
    }

    #[test]
    fn test_empty_sequence_in_front_of_rparen() {
        let mut tokens = Lexer::new(")").lex().expect("should work").into();

        assert_eq!(
            FormalParameterSequence::parse(&mut tokens),
            Ok(FormalParameterSequence::Empty {
                position: Span::default(),
            })
        );
    }

    #[test]
    fn test_sequence_nests_to_the_right() {
        let mut tokens = Lexer::new("x: Integer, var y: Integer, out z: Integer")
            .lex()
            .expect("should work")
            .into();

        assert_eq!(
            FormalParameterSequence::parse(&mut tokens),
            Ok(FormalParameterSequence::Multiple {
                parameter: FormalParameter::Const {
                    identifier: identifier("x"),
                    denoter: integer_type(),
                    position: Span::default(),
                },
                rest: Box::new(FormalParameterSequence::Multiple {
                    parameter: FormalParameter::Var {
                        identifier: identifier("y"),
                        denoter: integer_type(),
                        position: Span::default(),
                    },
                    rest: Box::new(FormalParameterSequence::Single {
                        parameter: FormalParameter::Result {
                            identifier: identifier("z"),
                            denoter: integer_type(),
                            position: Span::default(),
                        },
                        position: Span::default(),
                    }),
                    position: Span::default(),
                }),
                position: Span::default(),
            })
        );
    }

    #[test]
    fn test_in_is_const_and_in_out_is_value_result() {
        let mut tokens = Lexer::new("in x: Integer, in out y: Integer")
            .lex()
            .expect("should work")
            .into();

        let result = FormalParameterSequence::parse(&mut tokens).expect("should work");
        let FormalParameterSequence::Multiple { parameter, rest, .. } = result else {
            panic!("expected two parameters");
        };

        assert!(matches!(parameter, FormalParameter::Const { .. }));
        let FormalParameterSequence::Single { parameter, .. } = *rest else {
            panic!("expected one trailing parameter");
        };
        assert!(matches!(parameter, FormalParameter::ValueResult { .. }));
    }

    #[test]
    fn test_parse_proc_parameter() {
        let mut tokens = Lexer::new("proc callback (n: Integer)")
            .lex()
            .expect("should work")
            .into();

        let result = FormalParameter::parse(&mut tokens).expect("should work");
        assert!(matches!(result, FormalParameter::Proc { .. }));
    }

    #[test]
    fn test_parse_func_parameter() {
        let mut tokens = Lexer::new("func compare (x: Integer, y: Integer): Boolean")
            .lex()
            .expect("should work")
            .into();

        let result = FormalParameter::parse(&mut tokens).expect("should work");
        let FormalParameter::Func { formals, .. } = result else {
            panic!("expected a func parameter");
        };
        assert!(matches!(*formals, FormalParameterSequence::Multiple { .. }));
    }

    #[test]
    fn test_error_on_comma_without_parameter() {
        let mut tokens = Lexer::new("x: Integer, )").lex().expect("should work").into();

        assert_eq!(
            FormalParameterSequence::parse(&mut tokens),
            Err(ParseError {
                message: "\")\" cannot start a formal parameter".into(),
                position: Some(Span::default()),
            })
        );
    }
}
