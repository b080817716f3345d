use crate::{
    lexer::{Span, Token, TokenKind},
    parser::{FromTokens, ParseError, ParseState},
};

use super::{
    ActualParameterSequence, ArrayAggregate, CharacterLiteral, Declaration, Identifier,
    IntegerLiteral, Operator, RecordAggregate, Vname,
};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Expression {
    Integer {
        literal: IntegerLiteral,
        position: Span,
    },
    Character {
        literal: CharacterLiteral,
        position: Span,
    },
    Vname {
        vname: Vname,
        position: Span,
    },
    Call {
        identifier: Identifier,
        actuals: ActualParameterSequence,
        position: Span,
    },
    If {
        condition: Box<Expression>,
        then_expression: Box<Expression>,
        else_expression: Box<Expression>,
        position: Span,
    },
    Let {
        declaration: Box<Declaration>,
        expression: Box<Expression>,
        position: Span,
    },
    Unary {
        operator: Operator,
        operand: Box<Expression>,
        position: Span,
    },
    Binary {
        left: Box<Expression>,
        operator: Operator,
        right: Box<Expression>,
        position: Span,
    },
    Array {
        aggregate: ArrayAggregate,
        position: Span,
    },
    Record {
        aggregate: RecordAggregate,
        position: Span,
    },
}

impl Expression {
    pub fn position(&self) -> Span {
        match self {
            Expression::Integer { position, .. }
            | Expression::Character { position, .. }
            | Expression::Vname { position, .. }
            | Expression::Call { position, .. }
            | Expression::If { position, .. }
            | Expression::Let { position, .. }
            | Expression::Unary { position, .. }
            | Expression::Binary { position, .. }
            | Expression::Array { position, .. }
            | Expression::Record { position, .. } => *position,
        }
    }

    /// Parse a chain of primaries joined by operators. All operators share
    /// one precedence level, so the chain folds strictly to the left.
    fn parse_secondary(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        let mut expression = Expression::parse_primary(tokens)?;
        while tokens.peek_kind() == TokenKind::Operator {
            let operator = Operator::parse(tokens)?;
            let right = Expression::parse_primary(tokens)?;
            expression = Expression::Binary {
                left: Box::new(expression),
                operator,
                right: Box::new(right),
                position: start.merge(&tokens.previous_position()),
            };
        }

        Ok(expression)
    }

    fn parse_primary(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        match tokens.peek_kind() {
            TokenKind::IntLiteral => {
                let literal = IntegerLiteral::parse(tokens)?;
                Ok(Expression::Integer {
                    literal,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::CharLiteral => {
                let literal = CharacterLiteral::parse(tokens)?;
                Ok(Expression::Character {
                    literal,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::LBracket => {
                tokens.next();
                let aggregate = ArrayAggregate::parse(tokens)?;
                tokens.expect(TokenKind::RBracket)?;
                Ok(Expression::Array {
                    aggregate,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::LCurly => {
                tokens.next();
                let aggregate = RecordAggregate::parse(tokens)?;
                tokens.expect(TokenKind::RCurly)?;
                Ok(Expression::Record {
                    aggregate,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::Identifier => {
                let identifier = Identifier::parse(tokens)?;
                if tokens.peek_kind() == TokenKind::LParen {
                    tokens.next();
                    let actuals = ActualParameterSequence::parse(tokens)?;
                    tokens.expect(TokenKind::RParen)?;
                    Ok(Expression::Call {
                        identifier,
                        actuals,
                        position: start.merge(&tokens.previous_position()),
                    })
                } else {
                    let vname = Vname::parse_rest(identifier, tokens)?;
                    Ok(Expression::Vname {
                        vname,
                        position: start.merge(&tokens.previous_position()),
                    })
                }
            }
            TokenKind::Operator => {
                let operator = Operator::parse(tokens)?;
                let operand = Expression::parse_primary(tokens)?;
                Ok(Expression::Unary {
                    operator,
                    operand: Box::new(operand),
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::LParen => {
                // parentheses are purely syntactic; the inner expression
                // keeps its own span
                tokens.next();
                let expression = Expression::parse(tokens)?;
                tokens.expect(TokenKind::RParen)?;
                Ok(expression)
            }
            _ => Err(tokens.cannot_start("an expression")),
        }
    }
}

impl FromTokens for Expression {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        match tokens.peek_kind() {
            TokenKind::Let => {
                tokens.next();
                let declaration = Declaration::parse(tokens)?;
                tokens.expect(TokenKind::In)?;
                let expression = Expression::parse(tokens)?;
                Ok(Expression::Let {
                    declaration: Box::new(declaration),
                    expression: Box::new(expression),
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::If => {
                tokens.next();
                let condition = Expression::parse(tokens)?;
                tokens.expect(TokenKind::Then)?;
                let then_expression = Expression::parse(tokens)?;
                tokens.expect(TokenKind::Else)?;
                let else_expression = Expression::parse(tokens)?;
                Ok(Expression::If {
                    condition: Box::new(condition),
                    then_expression: Box::new(then_expression),
                    else_expression: Box::new(else_expression),
                    position: start.merge(&tokens.previous_position()),
                })
            }
            _ => Expression::parse_secondary(tokens),
        }
    }
}
