use crate::{
    ast::Program,
    error::ParseError,
    interpreter::{lexer::tokenize, parser::core::parse_program},
};

/// Source of the functions every program can use without defining them:
/// `range(offset, count)`, `map(list, f)` and `flatMap(list, f)`.
pub const PRELUDE: &str = include_str!("prelude.lum");

/// Parses the prelude.
///
/// # Errors
/// Never in practice; the prelude is fixed source that is covered by tests.
///
/// # Example
/// ```
/// let program = lumen::prelude::program().unwrap();
///
/// assert_eq!(program.statements.len(), 3);
/// ```
pub fn program() -> Result<Program, ParseError> {
    parse_program(&tokenize(PRELUDE)?)
}
