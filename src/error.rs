/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code: unrecognized characters, tokens no grammar rule accepts, premature end
/// of input, and malformed lambda parameter lists.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// unbound identifiers, re-declarations, arity mismatches, operand type
/// mismatches, and non-boolean conditions.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
