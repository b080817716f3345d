use crate::{
    formatter::{Format, FormatterContext},
    parser::ast::{
        ActualParameter, ActualParameterSequence, Command, Declaration, FieldTypeDenoter,
        FormalParameter, FormalParameterSequence, Program, TypeDenoter,
    },
};

/// Emit a command in a single-command position (loop and branch bodies).
/// A sequence needs its `begin`/`end` back to reparse as one command.
fn format_single(command: &Command, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
    if let Command::Sequential { .. } = command {
        ctx.write("begin ")?;
        command.format(ctx)?;
        ctx.write(" end")
    } else {
        command.format(ctx)
    }
}

impl Format for Program {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        self.command.format(ctx)
    }
}

impl Format for Command {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        match self {
            Command::Empty { .. } => Ok(()),
            Command::Assign {
                vname, expression, ..
            } => {
                vname.format(ctx)?;
                ctx.write(" := ")?;
                expression.format(ctx)
            }
            Command::Call {
                identifier,
                actuals,
                ..
            } => {
                identifier.format(ctx)?;
                ctx.write("(")?;
                actuals.format(ctx)?;
                ctx.write(")")
            }
            Command::Sequential { first, second, .. } => {
                first.format(ctx)?;
                ctx.write("; ")?;
                second.format(ctx)
            }
            Command::Let {
                declaration, body, ..
            } => {
                ctx.write("let ")?;
                declaration.format(ctx)?;
                ctx.write(" in ")?;
                format_single(body, ctx)
            }
            Command::If {
                condition,
                then_body,
                else_body,
                ..
            } => {
                ctx.write("if ")?;
                condition.format(ctx)?;
                ctx.write(" then ")?;
                format_single(then_body, ctx)?;
                ctx.write(" else ")?;
                format_single(else_body, ctx)
            }
            Command::While {
                condition, body, ..
            } => {
                ctx.write("while ")?;
                condition.format(ctx)?;
                ctx.write(" do ")?;
                format_single(body, ctx)
            }
            Command::Repeat {
                body, condition, ..
            } => {
                ctx.write("repeat ")?;
                format_single(body, ctx)?;
                ctx.write(" until ")?;
                condition.format(ctx)
            }
            Command::For {
                declaration,
                from,
                to,
                body,
                ..
            } => {
                ctx.write("for ")?;
                if let Declaration::Const { identifier, .. } = declaration.as_ref() {
                    identifier.format(ctx)?;
                }
                ctx.write(" from ")?;
                from.format(ctx)?;
                ctx.write(" to ")?;
                to.format(ctx)?;
                ctx.write(" do ")?;
                format_single(body, ctx)
            }
            Command::Case {
                scrutinee,
                arms,
                else_body,
                ..
            } => {
                ctx.write("case ")?;
                scrutinee.format(ctx)?;
                ctx.write(" of ")?;
                for arm in arms {
                    arm.label.format(ctx)?;
                    ctx.write(": ")?;
                    format_single(&arm.body, ctx)?;
                    ctx.write("; ")?;
                }
                ctx.write("else: ")?;
                format_single(else_body, ctx)
            }
        }
    }
}

impl Format for Declaration {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        match self {
            Declaration::Const {
                identifier,
                expression,
                ..
            } => {
                ctx.write("const ")?;
                identifier.format(ctx)?;
                ctx.write(" is ")?;
                expression.format(ctx)
            }
            Declaration::Var {
                identifier,
                denoter,
                ..
            } => {
                ctx.write("var ")?;
                identifier.format(ctx)?;
                ctx.write(": ")?;
                denoter.format(ctx)
            }
            Declaration::InitVar {
                identifier,
                expression,
                ..
            } => {
                ctx.write("var ")?;
                identifier.format(ctx)?;
                ctx.write(" := ")?;
                expression.format(ctx)
            }
            Declaration::Proc {
                identifier,
                formals,
                body,
                ..
            } => {
                ctx.write("proc ")?;
                identifier.format(ctx)?;
                ctx.write(" (")?;
                formals.format(ctx)?;
                ctx.write(") is ")?;
                format_single(body, ctx)
            }
            Declaration::Func {
                identifier,
                formals,
                result,
                expression,
                ..
            } => {
                ctx.write("func ")?;
                identifier.format(ctx)?;
                ctx.write(" (")?;
                formals.format(ctx)?;
                ctx.write("): ")?;
                result.format(ctx)?;
                ctx.write(" is ")?;
                expression.format(ctx)
            }
            Declaration::Type {
                identifier,
                denoter,
                ..
            } => {
                ctx.write("type ")?;
                identifier.format(ctx)?;
                ctx.write(" is ")?;
                denoter.format(ctx)
            }
            Declaration::UserUnaryOperator {
                operator,
                formals,
                result,
                expression,
                ..
            }
            | Declaration::UserBinaryOperator {
                operator,
                formals,
                result,
                expression,
                ..
            } => {
                ctx.write("func ")?;
                operator.format(ctx)?;
                ctx.write(" (")?;
                formals.format(ctx)?;
                ctx.write("): ")?;
                result.format(ctx)?;
                ctx.write(" is ")?;
                expression.format(ctx)
            }
            Declaration::Sequential { first, second, .. } => {
                first.format(ctx)?;
                ctx.write("; ")?;
                second.format(ctx)
            }
        }
    }
}

impl Format for FormalParameterSequence {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        match self {
            FormalParameterSequence::Empty { .. } => Ok(()),
            FormalParameterSequence::Single { parameter, .. } => parameter.format(ctx),
            FormalParameterSequence::Multiple {
                parameter, rest, ..
            } => {
                parameter.format(ctx)?;
                ctx.write(", ")?;
                rest.format(ctx)
            }
        }
    }
}

impl Format for FormalParameter {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        match self {
            FormalParameter::Const {
                identifier,
                denoter,
                ..
            } => {
                identifier.format(ctx)?;
                ctx.write(": ")?;
                denoter.format(ctx)
            }
            FormalParameter::Var {
                identifier,
                denoter,
                ..
            } => {
                ctx.write("var ")?;
                identifier.format(ctx)?;
                ctx.write(": ")?;
                denoter.format(ctx)
            }
            FormalParameter::Result {
                identifier,
                denoter,
                ..
            } => {
                ctx.write("out ")?;
                identifier.format(ctx)?;
                ctx.write(": ")?;
                denoter.format(ctx)
            }
            FormalParameter::ValueResult {
                identifier,
                denoter,
                ..
            } => {
                ctx.write("in out ")?;
                identifier.format(ctx)?;
                ctx.write(": ")?;
                denoter.format(ctx)
            }
            FormalParameter::Proc {
                identifier,
                formals,
                ..
            } => {
                ctx.write("proc ")?;
                identifier.format(ctx)?;
                ctx.write(" (")?;
                formals.format(ctx)?;
                ctx.write(")")
            }
            FormalParameter::Func {
                identifier,
                formals,
                result,
                ..
            } => {
                ctx.write("func ")?;
                identifier.format(ctx)?;
                ctx.write(" (")?;
                formals.format(ctx)?;
                ctx.write("): ")?;
                result.format(ctx)
            }
        }
    }
}

impl Format for ActualParameterSequence {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        match self {
            ActualParameterSequence::Empty { .. } => Ok(()),
            ActualParameterSequence::Single { parameter, .. } => parameter.format(ctx),
            ActualParameterSequence::Multiple {
                parameter, rest, ..
            } => {
                parameter.format(ctx)?;
                ctx.write(", ")?;
                rest.format(ctx)
            }
        }
    }
}

impl Format for ActualParameter {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        match self {
            ActualParameter::Const { expression, .. } => expression.format(ctx),
            ActualParameter::Var { vname, .. } => {
                ctx.write("var ")?;
                vname.format(ctx)
            }
            ActualParameter::Result { vname, .. } => {
                ctx.write("out ")?;
                vname.format(ctx)
            }
            ActualParameter::ValueResult { vname, .. } => {
                ctx.write("in out ")?;
                vname.format(ctx)
            }
            ActualParameter::Proc { identifier, .. } => {
                ctx.write("proc ")?;
                identifier.format(ctx)
            }
            ActualParameter::Func { identifier, .. } => {
                ctx.write("func ")?;
                identifier.format(ctx)
            }
        }
    }
}

impl Format for TypeDenoter {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        match self {
            TypeDenoter::Simple { identifier, .. } => identifier.format(ctx),
            TypeDenoter::Array { size, element, .. } => {
                ctx.write("array ")?;
                size.format(ctx)?;
                ctx.write(" of ")?;
                element.format(ctx)
            }
            TypeDenoter::Record { fields, .. } => {
                ctx.write("record ")?;
                fields.format(ctx)?;
                ctx.write(" end")
            }
        }
    }
}

impl Format for FieldTypeDenoter {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        match self {
            FieldTypeDenoter::Single {
                identifier,
                denoter,
                ..
            } => {
                identifier.format(ctx)?;
                ctx.write(": ")?;
                denoter.format(ctx)
            }
            FieldTypeDenoter::Multiple {
                identifier,
                denoter,
                rest,
                ..
            } => {
                identifier.format(ctx)?;
                ctx.write(": ")?;
                denoter.format(ctx)?;
                ctx.write(", ")?;
                rest.format(ctx)
            }
        }
    }
}
