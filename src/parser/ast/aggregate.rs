use crate::{
    lexer::{Span, Token, TokenKind},
    parser::{FromTokens, ParseError, ParseState},
};

use super::{Expression, Identifier};

/// Literal initializer for an array value, `[e, ...]`. The comma chain is
/// right-associated.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ArrayAggregate {
    Single {
        expression: Box<Expression>,
        position: Span,
    },
    Multiple {
        expression: Box<Expression>,
        rest: Box<ArrayAggregate>,
        position: Span,
    },
}

impl ArrayAggregate {
    pub fn position(&self) -> Span {
        match self {
            ArrayAggregate::Single { position, .. }
            | ArrayAggregate::Multiple { position, .. } => *position,
        }
    }
}

impl FromTokens for ArrayAggregate {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        let expression = Box::new(Expression::parse(tokens)?);
        if tokens.peek_kind() == TokenKind::Comma {
            tokens.next();
            let rest = Box::new(ArrayAggregate::parse(tokens)?);
            Ok(ArrayAggregate::Multiple {
                expression,
                rest,
                position: start.merge(&tokens.previous_position()),
            })
        } else {
            Ok(ArrayAggregate::Single {
                expression,
                position: start.merge(&tokens.previous_position()),
            })
        }
    }
}

/// Literal initializer for a record value, `{f is e, ...}`. The comma chain
/// is right-associated.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RecordAggregate {
    Single {
        identifier: Identifier,
        expression: Box<Expression>,
        position: Span,
    },
    Multiple {
        identifier: Identifier,
        expression: Box<Expression>,
        rest: Box<RecordAggregate>,
        position: Span,
    },
}

impl RecordAggregate {
    pub fn position(&self) -> Span {
        match self {
            RecordAggregate::Single { position, .. }
            | RecordAggregate::Multiple { position, .. } => *position,
        }
    }
}

impl FromTokens for RecordAggregate {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        let identifier = Identifier::parse(tokens)?;
        tokens.expect(TokenKind::Is)?;
        let expression = Box::new(Expression::parse(tokens)?);

        if tokens.peek_kind() == TokenKind::Comma {
            tokens.next();
            let rest = Box::new(RecordAggregate::parse(tokens)?);
            Ok(RecordAggregate::Multiple {
                identifier,
                expression,
                rest,
                position: start.merge(&tokens.previous_position()),
            })
        } else {
            Ok(RecordAggregate::Single {
                identifier,
                expression,
                position: start.merge(&tokens.previous_position()),
            })
        }
    }
}
