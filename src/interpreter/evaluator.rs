/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime context, the statement
/// status threaded through control flow, and error propagation.
pub mod core;

/// Frame stack management.
///
/// Implements scoped frames, name lookup, declaration and re-assignment.
pub mod frame;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparisons, tolerant equality, and short-circuiting
/// logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Function evaluation.
///
/// Handles invocation of natives and lambdas, argument checking, and return
/// value computation.
pub mod function;

/// Evaluation of `loop` and `for` statements.
///
/// Re-tests loop conditions, manages iteration variables, and unwinds on
/// `return`.
pub mod iteration;

/// Native functions.
///
/// Declares the catalog of functions bound in the outermost frame.
pub mod native;
