use crate::{
    lexer::{Span, Token, TokenKind},
    parser::{FromTokens, ParseError, ParseState},
};

use super::{
    Command, Expression, FormalParameterSequence, Identifier, Operator, TypeDenoter,
};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Declaration {
    Const {
        identifier: Identifier,
        expression: Expression,
        position: Span,
    },
    Var {
        identifier: Identifier,
        denoter: TypeDenoter,
        position: Span,
    },
    /// `var x := e`: a variable whose type is taken from its initial value.
    InitVar {
        identifier: Identifier,
        expression: Expression,
        position: Span,
    },
    Proc {
        identifier: Identifier,
        formals: FormalParameterSequence,
        body: Box<Command>,
        position: Span,
    },
    Func {
        identifier: Identifier,
        formals: FormalParameterSequence,
        result: TypeDenoter,
        expression: Expression,
        position: Span,
    },
    Type {
        identifier: Identifier,
        denoter: TypeDenoter,
        position: Span,
    },
    /// `func <op> (x: T): R is e` with a single formal parameter.
    UserUnaryOperator {
        operator: Operator,
        formals: FormalParameterSequence,
        result: TypeDenoter,
        expression: Expression,
        position: Span,
    },
    /// `func <op> (x: T, y: U): R is e` with exactly two formal parameters.
    UserBinaryOperator {
        operator: Operator,
        formals: FormalParameterSequence,
        result: TypeDenoter,
        expression: Expression,
        position: Span,
    },
    Sequential {
        first: Box<Declaration>,
        second: Box<Declaration>,
        position: Span,
    },
}

impl Declaration {
    pub fn position(&self) -> Span {
        match self {
            Declaration::Const { position, .. }
            | Declaration::Var { position, .. }
            | Declaration::InitVar { position, .. }
            | Declaration::Proc { position, .. }
            | Declaration::Func { position, .. }
            | Declaration::Type { position, .. }
            | Declaration::UserUnaryOperator { position, .. }
            | Declaration::UserBinaryOperator { position, .. }
            | Declaration::Sequential { position, .. } => *position,
        }
    }

    /// Parse one declaration without a trailing `;` sequence.
    fn parse_single(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        match tokens.peek_kind() {
            TokenKind::Const => {
                tokens.next();
                let identifier = Identifier::parse(tokens)?;
                tokens.expect(TokenKind::Is)?;
                let expression = Expression::parse(tokens)?;
                Ok(Declaration::Const {
                    identifier,
                    expression,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::Var => {
                tokens.next();
                let identifier = Identifier::parse(tokens)?;
                if tokens.peek_kind() == TokenKind::Colon {
                    tokens.next();
                    let denoter = TypeDenoter::parse(tokens)?;
                    Ok(Declaration::Var {
                        identifier,
                        denoter,
                        position: start.merge(&tokens.previous_position()),
                    })
                } else {
                    tokens.expect(TokenKind::Becomes)?;
                    let expression = Expression::parse(tokens)?;
                    Ok(Declaration::InitVar {
                        identifier,
                        expression,
                        position: start.merge(&tokens.previous_position()),
                    })
                }
            }
            TokenKind::Proc => {
                tokens.next();
                let identifier = Identifier::parse(tokens)?;
                tokens.expect(TokenKind::LParen)?;
                let formals = FormalParameterSequence::parse(tokens)?;
                tokens.expect(TokenKind::RParen)?;
                tokens.expect(TokenKind::Is)?;
                let body = Command::parse_single(tokens)?;
                Ok(Declaration::Proc {
                    identifier,
                    formals,
                    body: Box::new(body),
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::Func => {
                tokens.next();
                if tokens.peek_kind() == TokenKind::Identifier {
                    let identifier = Identifier::parse(tokens)?;
                    tokens.expect(TokenKind::LParen)?;
                    let formals = FormalParameterSequence::parse(tokens)?;
                    tokens.expect(TokenKind::RParen)?;
                    tokens.expect(TokenKind::Colon)?;
                    let result = TypeDenoter::parse(tokens)?;
                    tokens.expect(TokenKind::Is)?;
                    let expression = Expression::parse(tokens)?;
                    Ok(Declaration::Func {
                        identifier,
                        formals,
                        result,
                        expression,
                        position: start.merge(&tokens.previous_position()),
                    })
                } else {
                    Declaration::parse_operator(tokens, start)
                }
            }
            TokenKind::Type => {
                tokens.next();
                let identifier = Identifier::parse(tokens)?;
                tokens.expect(TokenKind::Is)?;
                let denoter = TypeDenoter::parse(tokens)?;
                Ok(Declaration::Type {
                    identifier,
                    denoter,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            _ => Err(tokens.cannot_start("a declaration")),
        }
    }

    /// Parse a user-defined operator declaration; `func` is already consumed.
    fn parse_operator(tokens: &mut ParseState<Token>, start: Span) -> Result<Self, ParseError> {
        let operator = Operator::parse(tokens)?;
        tokens.expect(TokenKind::LParen)?;
        let formals = FormalParameterSequence::parse(tokens)?;
        tokens.expect(TokenKind::RParen)?;
        tokens.expect(TokenKind::Colon)?;
        let result = TypeDenoter::parse(tokens)?;
        tokens.expect(TokenKind::Is)?;
        let expression = Expression::parse(tokens)?;

        let position = start.merge(&tokens.previous_position());

        let is_binary = matches!(formals, FormalParameterSequence::Multiple { .. });
        let too_many = matches!(
            &formals,
            FormalParameterSequence::Multiple { rest, .. }
                if matches!(**rest, FormalParameterSequence::Multiple { .. })
        );
        if too_many {
            // recorded rather than returned so the declaration list parses
            // through; the caller fails the parse once the stream is done
            tokens.add_error(ParseError {
                message: "Operator declaration must have either 1 or 2 parameters".into(),
                position: Some(position),
            });
        }

        if is_binary {
            Ok(Declaration::UserBinaryOperator {
                operator,
                formals,
                result,
                expression,
                position,
            })
        } else {
            Ok(Declaration::UserUnaryOperator {
                operator,
                formals,
                result,
                expression,
                position,
            })
        }
    }
}

impl FromTokens for Declaration {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        let mut declaration = Declaration::parse_single(tokens)?;
        while tokens.peek_kind() == TokenKind::Semicolon {
            tokens.next();
            let second = Declaration::parse_single(tokens)?;
            declaration = Declaration::Sequential {
                first: Box::new(declaration),
                second: Box::new(second),
                position: start.merge(&tokens.previous_position()),
            };
        }

        Ok(declaration)
    }
}
