/// Executes programs over a stack of frames.
///
/// Statements report a [`Status`](evaluator::core::Status) so that `return`
/// can unwind through blocks, conditionals and loops up to the nearest call.
/// Names resolve dynamically: a lambda sees the frames of its caller.
///
/// # Responsibilities
/// - Runs statements and evaluates expressions.
/// - Binds the native functions in the outermost frame.
/// - Reports runtime failures with the line of the failing node.
pub mod evaluator;
/// Turns source text into `(token, line)` pairs.
///
/// Built on `logos`. Comments and whitespace never reach the parser; the
/// position of a token in the output is what parse errors refer to.
pub mod lexer;
/// Builds the syntax tree from the token sequence.
///
/// Rules are plain functions over a copyable cursor and are combined by
/// ordered alternation. Operator expressions are read flat and then resolved
/// by precedence.
///
/// # Responsibilities
/// - Recognizes statements, values and operator expressions.
/// - Reports the failure that progressed furthest, with the rules involved.
pub mod parser;
/// Runtime values: numbers, strings, booleans, shared lists, functions and
/// `null`.
pub mod value;
