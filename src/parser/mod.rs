use colored::Colorize;
use std::{error::Error, fmt::Display};

pub mod ast;
mod parse_state;

pub use self::parse_state::*;

use crate::lexer::{Span, Token};

use self::ast::Program;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: Option<Span>,
}

impl ParseError {
    pub fn eof(item: &str) -> ParseError {
        ParseError {
            message: format!("hit EOF while parsing {item}"),
            position: None,
        }
    }

    /// Render the error against the source text, underlining the offending
    /// span in the line it starts on.
    pub fn pretty(&self, source: &str) -> String {
        let Some(position) = self.position else {
            return self.message.clone();
        };

        let upto = &source[..position.start.min(source.len())];
        let line_number = upto.matches('\n').count() + 1;
        let line_start = upto.rfind('\n').map(|index| index + 1).unwrap_or(0);
        let line_str = source[line_start..].lines().next().unwrap_or("");

        let left_margin = format!("{line_number}").len();
        let left_margin_fill = " ".repeat(left_margin);

        let left_padding_fill = " ".repeat(position.start - line_start);

        let error_len = position
            .end
            .min(line_start + line_str.len())
            .saturating_sub(position.start)
            .max(1);
        let squiggles = "^".repeat(error_len).red();

        format!(
            "{left_margin_fill} |\n{line_number} |{line_str}\n{left_margin_fill} |{left_padding_fill}{squiggles} {}",
            self.message
        )
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(position) = &self.position {
            write!(f, "{} at {}..{}", self.message, position.start, position.end)
        } else {
            f.write_str(&self.message)
        }
    }
}

impl Error for ParseError {}

/// A syntactic category that can be parsed off the front of a token stream.
pub trait FromTokens: Sized {
    fn parse(tokens: &mut ParseState<Token>) -> Result<Self, ParseError>;
}

/// Parse a whole token stream into a program.
///
/// Fails fast on the first syntactic error; errors recorded on the state
/// during an otherwise successful parse fail it as well.
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    let mut tokens = ParseState::new(tokens);

    let program = Program::parse(&mut tokens)?;

    if let Some(error) = tokens.errors.first() {
        return Err(error.clone());
    }

    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_underlines_the_offending_span() {
        let source = "let var n: Integer\nin n := 1";
        let error = ParseError {
            message: "\"in\" expected here".into(),
            position: Some(Span { start: 19, end: 21 }),
        };

        let rendered = error.pretty(source);
        assert!(rendered.contains("2 |in n := 1"));
        assert!(rendered.contains("\"in\" expected here"));
    }

    #[test]
    fn test_pretty_without_position_is_the_message() {
        let error = ParseError::eof("a command");

        assert_eq!(error.pretty(""), "hit EOF while parsing a command");
    }
}
