use crate::{
    lexer::{Span, Token, TokenKind},
    parser::{FromTokens, ParseError, ParseState},
};

use super::{
    ActualParameterSequence, Declaration, Expression, Identifier, IntegerLiteral, Vname,
};

/// One arm of a case command: an integer label and the command it guards.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaseArm {
    pub label: IntegerLiteral,
    pub body: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Command {
    Empty {
        position: Span,
    },
    Assign {
        vname: Vname,
        expression: Expression,
        position: Span,
    },
    Call {
        identifier: Identifier,
        actuals: ActualParameterSequence,
        position: Span,
    },
    Sequential {
        first: Box<Command>,
        second: Box<Command>,
        position: Span,
    },
    Let {
        declaration: Box<Declaration>,
        body: Box<Command>,
        position: Span,
    },
    If {
        condition: Expression,
        then_body: Box<Command>,
        else_body: Box<Command>,
        position: Span,
    },
    While {
        condition: Expression,
        body: Box<Command>,
        position: Span,
    },
    Repeat {
        body: Box<Command>,
        condition: Expression,
        position: Span,
    },
    For {
        /// Binding of the loop variable to the lower bound, as a constant.
        /// The bound expression also appears in `from`; later phases rely on
        /// both copies.
        declaration: Box<Declaration>,
        from: Expression,
        to: Expression,
        body: Box<Command>,
        position: Span,
    },
    Case {
        scrutinee: Expression,
        arms: Vec<CaseArm>,
        else_body: Box<Command>,
        position: Span,
    },
}

impl Command {
    pub fn position(&self) -> Span {
        match self {
            Command::Empty { position, .. }
            | Command::Assign { position, .. }
            | Command::Call { position, .. }
            | Command::Sequential { position, .. }
            | Command::Let { position, .. }
            | Command::If { position, .. }
            | Command::While { position, .. }
            | Command::Repeat { position, .. }
            | Command::For { position, .. }
            | Command::Case { position, .. } => *position,
        }
    }

    /// Parse one command without a trailing `;` sequence.
    pub fn parse_single(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        match tokens.peek_kind() {
            TokenKind::Identifier => {
                let identifier = Identifier::parse(tokens)?;
                if tokens.peek_kind() == TokenKind::LParen {
                    tokens.next();
                    let actuals = ActualParameterSequence::parse(tokens)?;
                    tokens.expect(TokenKind::RParen)?;
                    Ok(Command::Call {
                        identifier,
                        actuals,
                        position: start.merge(&tokens.previous_position()),
                    })
                } else {
                    let vname = Vname::parse_rest(identifier, tokens)?;
                    tokens.expect(TokenKind::Becomes)?;
                    let expression = Expression::parse(tokens)?;
                    Ok(Command::Assign {
                        vname,
                        expression,
                        position: start.merge(&tokens.previous_position()),
                    })
                }
            }
            TokenKind::Begin => {
                // the brackets leave no node; the inner command keeps its span
                tokens.next();
                let command = Command::parse(tokens)?;
                tokens.expect(TokenKind::End)?;
                Ok(command)
            }
            TokenKind::Let => {
                tokens.next();
                let declaration = Declaration::parse(tokens)?;
                tokens.expect(TokenKind::In)?;
                let body = Command::parse_single(tokens)?;
                Ok(Command::Let {
                    declaration: Box::new(declaration),
                    body: Box::new(body),
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::If => {
                tokens.next();
                let condition = Expression::parse(tokens)?;
                tokens.expect(TokenKind::Then)?;
                let then_body = Command::parse_single(tokens)?;
                tokens.expect(TokenKind::Else)?;
                let else_body = Command::parse_single(tokens)?;
                Ok(Command::If {
                    condition,
                    then_body: Box::new(then_body),
                    else_body: Box::new(else_body),
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::While => {
                tokens.next();
                let condition = Expression::parse(tokens)?;
                tokens.expect(TokenKind::Do)?;
                let body = Command::parse_single(tokens)?;
                Ok(Command::While {
                    condition,
                    body: Box::new(body),
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::Repeat => {
                tokens.next();
                let body = Command::parse_single(tokens)?;
                tokens.expect(TokenKind::Until)?;
                let condition = Expression::parse(tokens)?;
                Ok(Command::Repeat {
                    body: Box::new(body),
                    condition,
                    position: start.merge(&tokens.previous_position()),
                })
            }
            TokenKind::For => {
                tokens.next();
                let identifier = Identifier::parse(tokens)?;
                tokens.expect(TokenKind::From)?;
                let from = Expression::parse(tokens)?;
                tokens.expect(TokenKind::To)?;
                let to = Expression::parse(tokens)?;
                tokens.expect(TokenKind::Do)?;
                let body = Command::parse_single(tokens)?;

                let position = start.merge(&tokens.previous_position());
                let declaration = Declaration::Const {
                    identifier,
                    expression: from.clone(),
                    position,
                };
                Ok(Command::For {
                    declaration: Box::new(declaration),
                    from,
                    to,
                    body: Box::new(body),
                    position,
                })
            }
            TokenKind::Case => {
                tokens.next();
                let scrutinee = Expression::parse(tokens)?;
                tokens.expect(TokenKind::Of)?;

                let mut arms = vec![];
                while tokens.peek_kind() != TokenKind::Else {
                    let label = IntegerLiteral::parse(tokens)?;
                    tokens.expect(TokenKind::Colon)?;
                    let body = Command::parse_single(tokens)?;
                    tokens.expect(TokenKind::Semicolon)?;
                    arms.push(CaseArm { label, body });
                }

                tokens.expect(TokenKind::Else)?;
                tokens.expect(TokenKind::Colon)?;
                let else_body = Command::parse_single(tokens)?;
                Ok(Command::Case {
                    scrutinee,
                    arms,
                    else_body: Box::new(else_body),
                    position: start.merge(&tokens.previous_position()),
                })
            }
            // the tokens a command may be empty in front of; the zero-width
            // span sits right after the previously consumed token
            TokenKind::Semicolon
            | TokenKind::End
            | TokenKind::Else
            | TokenKind::In
            | TokenKind::Eot => Ok(Command::Empty {
                position: Span::empty_at(tokens.previous_position().end),
            }),
            _ => Err(tokens.cannot_start("a command")),
        }
    }
}

impl FromTokens for Command {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let start = ParseState::position(tokens);

        let mut command = Command::parse_single(tokens)?;
        while tokens.peek_kind() == TokenKind::Semicolon {
            tokens.next();
            let second = Command::parse_single(tokens)?;
            command = Command::Sequential {
                first: Box::new(command),
                second: Box::new(second),
                position: start.merge(&tokens.previous_position()),
            };
        }

        Ok(command)
    }
}
