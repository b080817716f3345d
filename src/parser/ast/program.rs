use crate::{
    lexer::{Span, Token, TokenKind},
    parser::{FromTokens, ParseError, ParseState},
};

use super::Command;

/// Root of the syntax tree: a whole source file is one command.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Program {
    pub command: Command,
    pub position: Span,
}

impl FromTokens for Program {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError> {
        let command = Command::parse(tokens)?;

        match tokens.peek() {
            Some(token) if token.kind != TokenKind::Eot => Err(ParseError {
                message: format!("\"{}\" not expected after end of program", token.spelling),
                position: Some(token.position),
            }),
            _ => Ok(Program {
                command,
                position: Span {
                    start: 0,
                    end: tokens.previous_position().end,
                },
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;

    use super::*;

    #[test]
    fn test_empty_program() {
        let mut tokens = Lexer::new("").lex().expect("should work").into();

        assert_eq!(
            Program::parse(&mut tokens),
            Ok(Program {
                command: Command::Empty {
                    position: Span::default(),
                },
                position: Span::default(),
            })
        );
    }

    #[test]
    fn test_program_spans_the_whole_source() {
        let mut tokens = Lexer::new("x := 1").lex().expect("should work").into();

        let program = Program::parse(&mut tokens).expect("should work");
        assert_eq!((program.position.start, program.position.end), (0, 6));
    }

    #[test]
    fn test_error_on_trailing_tokens() {
        let mut tokens = Lexer::new("x := 1 end").lex().expect("should work").into();

        assert_eq!(
            Program::parse(&mut tokens),
            Err(ParseError {
                message: "\"end\" not expected after end of program".into(),
                position: Some(Span::default()),
            })
        );
    }
}
