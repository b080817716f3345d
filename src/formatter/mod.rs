mod command;
mod context;
mod expression;

pub use self::context::*;

use crate::parser::ast::Program;

/// Emission of canonical source text.
///
/// The canonical form is chosen so that reparsing it reproduces the tree it
/// was printed from: sequences in single-command positions are wrapped in
/// `begin`/`end`, and operands that are not primaries are parenthesized.
pub trait Format {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error>;
}

/// Canonical source text of a whole program.
pub fn format_program(program: &Program) -> String {
    let mut ctx = FormatterContext::new();
    // writing into a String cannot fail
    let _ = program.format(&mut ctx);
    ctx.into_output()
}
