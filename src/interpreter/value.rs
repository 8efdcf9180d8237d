/// Function values.
///
/// Defines `Function`, the shared representation of natives and lambdas, and
/// the arity rules natives declare.
pub mod function;

/// Runtime values.
///
/// Defines the `Value` enum together with conversions, display formatting, and
/// the tolerant equality used by `=`.
pub mod core;
