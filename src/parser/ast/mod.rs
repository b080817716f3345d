mod actual_parameter;
mod aggregate;
mod command;
mod declaration;
mod expression;
mod formal_parameter;
mod program;
mod terminal;
mod type_denoter;
mod vname;

pub use self::actual_parameter::*;
pub use self::aggregate::*;
pub use self::command::*;
pub use self::declaration::*;
pub use self::expression::*;
pub use self::formal_parameter::*;
pub use self::program::*;
pub use self::terminal::*;
pub use self::type_denoter::*;
pub use self::vname::*;
