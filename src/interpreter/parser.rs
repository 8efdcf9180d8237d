/// Core parsing machinery.
///
/// Defines the token cursor, the result type every grammar rule returns,
/// ordered alternation, and the program entry point.
pub mod core;

/// Operator expressions.
///
/// Collects operands and infix operators into a flat sequence and resolves it
/// into a tree according to precedence and associativity.
pub mod operator;

/// Value rules.
///
/// Parses the operands of operator expressions: literals, names, assignments,
/// invocations, lists, lambdas, and value-producing blocks.
pub mod expression;

/// Block parsing.
///
/// Parses brace-delimited statement sequences and extracts their trailing
/// expression.
pub mod block;

/// Statement parsing.
///
/// Handles `let`, `if`/`else`, `loop`, `for`, `return`, blocks, and expression
/// statements.
pub mod statement;

/// Utility functions for the parser.
///
/// Provides helpers, common checks, and reusable logic used during parsing.
pub mod utils;
