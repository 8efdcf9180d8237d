//! # lumen
//!
//! lumen is a small, dynamically typed scripting language written in Rust.
//! It has numbers, strings, booleans, shared mutable lists and first-class
//! lambdas, block-structured control flow, and a handful of native functions
//! for printing and list manipulation.
//!
//! Source goes through three stages: [`tokenize`] splits it into tokens,
//! [`parse_program`] builds the syntax tree with a combinator parser and an
//! operator-precedence resolver, and
//! [`Context`](interpreter::evaluator::core::Context) executes it over a
//! stack of frames.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{error::Error, io::Write};

pub use crate::interpreter::{lexer::tokenize, parser::core::parse_program};
use crate::{ast::Program, error::ParseError, interpreter::evaluator::core::Context};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing, or
/// evaluating code. Each carries the source line it refers to; parse failures
/// also carry the index of the offending token and the grammar rules that were
/// active.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, and value
/// representations to provide a complete runtime for source code.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The functions written in lumen itself that are loaded before a program.
pub mod prelude;
/// General utilities for safe numeric conversion.
///
/// Lists are indexed by `usize` while the language only has `f64` numbers;
/// these helpers convert between the two without silent data loss.
pub mod util;

/// Tokenizes and parses a whole program.
///
/// # Example
/// ```
/// let program = lumen::parse("let x := 1\nprint(x)").unwrap();
///
/// assert_eq!(program.statements.len(), 2);
/// ```
pub fn parse(source: &str) -> Result<Program, ParseError> {
    parse_program(&tokenize(source)?)
}

/// Parses and runs a program, writing its output to `out`.
///
/// The whole program is parsed before anything runs, so a syntax error
/// produces no output. With `prelude` set, `range`, `map` and `flatMap` are
/// defined first.
///
/// # Returns
/// The writer, so the caller can inspect what was written.
///
/// # Example
/// ```
/// use lumen::run_with_output;
///
/// let out = run_with_output("println(map(range(1, 3), x -> x * x))", true, Vec::<u8>::new()).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "[ 1, 4, 9 ]\n");
///
/// // Runtime errors stop the program.
/// assert!(run_with_output("print(y)", false, Vec::<u8>::new()).is_err());
/// ```
pub fn run_with_output<W: Write>(source: &str,
                                 prelude: bool,
                                 out: W)
                                 -> Result<W, Box<dyn Error>> {
    let program = parse(source)?;
    let mut context = Context::new(out);

    if prelude {
        context.load_library(&prelude::program()?)?;
    }
    context.execute_program(&program)?;

    let mut out = context.into_output();
    out.flush()?;
    Ok(out)
}

/// Parses and runs a program, writing its output to standard output.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use lumen::get_result;
///
/// assert!(get_result("let x := 2 + 2", false).is_ok());
///
/// // 'x' is not defined.
/// assert!(get_result("let y := x + 1", false).is_err());
/// ```
pub fn get_result(source: &str, prelude: bool) -> Result<(), Box<dyn Error>> {
    run_with_output(source, prelude, std::io::stdout().lock()).map(drop)
}
