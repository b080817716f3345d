use crate::{
    lexer::{Span, Token, TokenKind},
    parser::{FromTokens, ParseError, ParseState},
};

use super::{Expression, Identifier, Vname};

/// An argument at a call site, with its passing mode. A bare expression and
/// `in e` both pass by constant value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ActualParameter {
    Const {
        expression: Box<Expression>,
        position: Span,
    },
    Var {
        vname: Vname,
        position: Span,
    },
    Result {
        vname: Vname,
        position: Span,
    },
    ValueResult {
        vname: Vname,
        position: Span,
    },
    Proc {
        identifier: Identifier,
        position: Span,
    },
    Func {
        identifier: Identifier,
        position: Span,
    },
}

impl ActualParameter {
    pub fn position(&self) -> Span {
        match self {
            ActualParameter::Const { position, .. }
            | ActualParameter::Var { position, .. }
            | ActualParameter::Result { position, .. }
            | ActualParameter::ValueResult { position, .. }
            | ActualParameter::Proc { position, .. }
            | ActualParameter::Func { position, .. } => *position,
        }
    }
}

impl FromTokens for ActualParameter {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        match tokens.peek_kind() {
            // anything an expression can start with passes by constant value
            TokenKind::Identifier
            | TokenKind::IntLiteral
            | TokenKind::CharLiteral
            | TokenKind::Operator
            | TokenKind::Let
            | TokenKind::If
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::LCurly => {
                let expression = Box::new(Expression::parse(tokens)?);
                Ok(ActualParameter::Const {
                    expression,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::In => {
                tokens.next();
                if tokens.peek_kind() == TokenKind::Out {
                    tokens.next();
                    let vname = Vname::parse(tokens)?;
                    Ok(ActualParameter::ValueResult {
                        vname,
                        position: start.merge(&tokens.previous_position()),
                    })
                } else {
                    let expression = Box::new(Expression::parse(tokens)?);
                    Ok(ActualParameter::Const {
                        expression,
                        position: start.merge(&tokens.previous_position()),
                    })
                }
            }
            TokenKind::Out => {
                tokens.next();
                let vname = Vname::parse(tokens)?;
                Ok(ActualParameter::Result {
                    vname,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::Var => {
                tokens.next();
                let vname = Vname::parse(tokens)?;
                Ok(ActualParameter::Var {
                    vname,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::Proc => {
                tokens.next();
                let identifier = Identifier::parse(tokens)?;
                Ok(ActualParameter::Proc {
                    identifier,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::Func => {
                tokens.next();
                let identifier = Identifier::parse(tokens)?;
                Ok(ActualParameter::Func {
                    identifier,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            _ => Err(tokens.cannot_start("an actual parameter")),
        }
    }
}

/// The arguments of a call, as a right-associated chain.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ActualParameterSequence {
    Empty {
        position: Span,
    },
    Single {
        parameter: ActualParameter,
        position: Span,
    },
    Multiple {
        parameter: ActualParameter,
        rest: Box<ActualParameterSequence>,
        position: Span,
    },
}

impl ActualParameterSequence {
    pub fn position(&self) -> Span {
        match self {
            ActualParameterSequence::Empty { position, .. }
            | ActualParameterSequence::Single { position, .. }
            | ActualParameterSequence::Multiple { position, .. } => *position,
        }
    }

    fn parse_proper(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        let parameter = ActualParameter::parse(tokens)?;
        if tokens.peek_kind() == TokenKind::Comma {
            tokens.next();
            let rest = ActualParameterSequence::parse_proper(tokens)?;
            Ok(ActualParameterSequence::Multiple {
                parameter,
                rest: Box::new(rest),
                position: start.merge(&tokens.previous_position()),
            })
        } else {
            Ok(ActualParameterSequence::Single {
                parameter,
                position: start.merge(&tokens.previous_position()),
            })
        }
    }
}

impl FromTokens for ActualParameterSequence {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        if tokens.peek_kind() == TokenKind::RParen {
            Ok(ActualParameterSequence::Empty {
                position: Span::empty_at(tokens.previous_position().end),
            })
        } else {
            ActualParameterSequence::parse_proper(tokens)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::parser::ast::IntegerLiteral;

    use super::*;

    fn integer(spelling: &str) -> Expression {
        Expression::Integer {
            literal: IntegerLiteral {
                spelling: spelling.into(),
                position: Span::default(),
            },
            position: Span::default(),
        }
    }

    #[test]
    fn test_empty_sequence_in_front_of_rparen() {
        let mut tokens = Lexer::new(")").lex().expect("should work").into();

        assert_eq!(
            ActualParameterSequence::parse(&mut tokens),
            Ok(ActualParameterSequence::Empty {
                position: Span::default(),
            })
        );
    }

    #[test]
    fn test_expression_argument_is_const() {
        let mut tokens = Lexer::new("1 + 2").lex().expect("should work").into();

        let result = ActualParameter::parse(&mut tokens).expect("should work");
        assert!(matches!(result, ActualParameter::Const { .. }));
    }

    #[test]
    fn test_in_expression_is_const() {
        let mut tokens = Lexer::new("in 42").lex().expect("should work").into();

        assert_eq!(
            ActualParameter::parse(&mut tokens),
            Ok(ActualParameter::Const {
                expression: Box::new(integer("42")),
                position: Span::default(),
            })
        );
    }

    #[test]
    fn test_modes_dispatch_on_the_leading_keyword() {
        let mut tokens = Lexer::new("var x, out y, in out z, proc p, func f")
            .lex()
            .expect("should work")
            .into();

        let result = ActualParameterSequence::parse(&mut tokens).expect("should work");

        let mut parameters = vec![];
        let mut sequence = &result;
        loop {
            match sequence {
                ActualParameterSequence::Multiple {
                    parameter, rest, ..
                } => {
                    parameters.push(parameter);
                    sequence = rest;
                }
                ActualParameterSequence::Single { parameter, .. } => {
                    parameters.push(parameter);
                    break;
                }
                ActualParameterSequence::Empty { .. } => break,
            }
        }

        assert!(matches!(parameters[0], ActualParameter::Var { .. }));
        assert!(matches!(parameters[1], ActualParameter::Result { .. }));
        assert!(matches!(parameters[2], ActualParameter::ValueResult { .. }));
        assert!(matches!(parameters[3], ActualParameter::Proc { .. }));
        assert!(matches!(parameters[4], ActualParameter::Func { .. }));
    }

    #[test]
    fn test_var_argument_takes_a_vname() {
        let mut tokens = Lexer::new("var m.f[0]").lex().expect("should work").into();

        let result = ActualParameter::parse(&mut tokens).expect("should work");
        let ActualParameter::Var { vname, .. } = result else {
            panic!("expected a var argument");
        };
        assert!(matches!(vname, Vname::Subscript { .. }));
    }

    #[test]
    fn test_error_on_non_argument() {
        let mut tokens = Lexer::new("then").lex().expect("should work").into();

        assert_eq!(
            ActualParameter::parse(&mut tokens),
            Err(ParseError {
                message: "\"then\" cannot start an actual parameter".into(),
                position: Some(Span::default()),
            })
        );
    }
}
