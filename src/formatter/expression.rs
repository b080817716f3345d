use crate::{
    formatter::{Format, FormatterContext},
    parser::ast::{
        ArrayAggregate, CharacterLiteral, Expression, Identifier, IntegerLiteral, Operator,
        RecordAggregate, Vname,
    },
};

/// Emit an expression in a primary position (unary operand, binary right
/// operand), parenthesizing the forms only a `( )` group can put there.
fn format_primary(
    expression: &Expression,
    ctx: &mut FormatterContext,
) -> Result<(), std::fmt::Error> {
    match expression {
        Expression::Binary { .. } | Expression::If { .. } | Expression::Let { .. } => {
            ctx.write("(")?;
            expression.format(ctx)?;
            ctx.write(")")
        }
        _ => expression.format(ctx),
    }
}

/// Emit an expression in the left-operand position of an operator chain.
/// Nested binaries continue the chain, so only `if` and `let` need
/// parentheses here.
fn format_secondary(
    expression: &Expression,
    ctx: &mut FormatterContext,
) -> Result<(), std::fmt::Error> {
    match expression {
        Expression::If { .. } | Expression::Let { .. } => {
            ctx.write("(")?;
            expression.format(ctx)?;
            ctx.write(")")
        }
        _ => expression.format(ctx),
    }
}

impl Format for Expression {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        match self {
            Expression::Integer { literal, .. } => literal.format(ctx),
            Expression::Character { literal, .. } => literal.format(ctx),
            Expression::Vname { vname, .. } => vname.format(ctx),
            Expression::Call {
                identifier,
                actuals,
                ..
            } => {
                identifier.format(ctx)?;
                ctx.write("(")?;
                actuals.format(ctx)?;
                ctx.write(")")
            }
            Expression::If {
                condition,
                then_expression,
                else_expression,
                ..
            } => {
                ctx.write("if ")?;
                condition.format(ctx)?;
                ctx.write(" then ")?;
                then_expression.format(ctx)?;
                ctx.write(" else ")?;
                else_expression.format(ctx)
            }
            Expression::Let {
                declaration,
                expression,
                ..
            } => {
                ctx.write("let ")?;
                declaration.format(ctx)?;
                ctx.write(" in ")?;
                expression.format(ctx)
            }
            Expression::Unary {
                operator, operand, ..
            } => {
                // the space keeps stacked operators from fusing into one
                operator.format(ctx)?;
                ctx.write(" ")?;
                format_primary(operand, ctx)
            }
            Expression::Binary {
                left,
                operator,
                right,
                ..
            } => {
                format_secondary(left, ctx)?;
                ctx.write(" ")?;
                operator.format(ctx)?;
                ctx.write(" ")?;
                format_primary(right, ctx)
            }
            Expression::Array { aggregate, .. } => {
                ctx.write("[")?;
                aggregate.format(ctx)?;
                ctx.write("]")
            }
            Expression::Record { aggregate, .. } => {
                ctx.write("{")?;
                aggregate.format(ctx)?;
                ctx.write("}")
            }
        }
    }
}

impl Format for Vname {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        match self {
            Vname::Simple { identifier, .. } => identifier.format(ctx),
            Vname::Dot { record, field, .. } => {
                record.format(ctx)?;
                ctx.write(".")?;
                field.format(ctx)
            }
            Vname::Subscript { array, index, .. } => {
                array.format(ctx)?;
                ctx.write("[")?;
                index.format(ctx)?;
                ctx.write("]")
            }
        }
    }
}

impl Format for ArrayAggregate {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        match self {
            ArrayAggregate::Single { expression, .. } => expression.format(ctx),
            ArrayAggregate::Multiple {
                expression, rest, ..
            } => {
                expression.format(ctx)?;
                ctx.write(", ")?;
                rest.format(ctx)
            }
        }
    }
}

impl Format for RecordAggregate {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        match self {
            RecordAggregate::Single {
                identifier,
                expression,
                ..
            } => {
                identifier.format(ctx)?;
                ctx.write(" is ")?;
                expression.format(ctx)
            }
            RecordAggregate::Multiple {
                identifier,
                expression,
                rest,
                ..
            } => {
                identifier.format(ctx)?;
                ctx.write(" is ")?;
                expression.format(ctx)?;
                ctx.write(", ")?;
                rest.format(ctx)
            }
        }
    }
}

impl Format for Identifier {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write(&self.spelling)
    }
}

impl Format for Operator {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write(&self.spelling)
    }
}

impl Format for IntegerLiteral {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write(&self.spelling)
    }
}

impl Format for CharacterLiteral {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write(&self.spelling)
    }
}
