use std::io::Write;

use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl<W: Write> Context<W> {
    /// Evaluates a prefix operation.
    ///
    /// # Errors
    /// - `ExpectedNumber` when negating a non-number.
    /// - `ExpectedBoolean` when applying `not` to a non-boolean.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                expr: &Expr,
                                line: usize)
                                -> EvalResult<Value> {
        let value = self.eval(expr)?;
        apply_unary(op, &value, line)
    }
}

/// Applies a prefix operator to an evaluated operand.
///
/// # Example
/// ```
/// use lumen::{
///     ast::UnaryOperator,
///     interpreter::{evaluator::unary::apply_unary, value::core::Value},
/// };
///
/// assert_eq!(apply_unary(UnaryOperator::Negate, &Value::Number(2.0), 1).unwrap(),
///            Value::Number(-2.0));
/// assert_eq!(apply_unary(UnaryOperator::Not, &Value::Bool(true), 1).unwrap(),
///            Value::Bool(false));
/// ```
pub fn apply_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
    match op {
        UnaryOperator::Negate => Ok(Value::Number(-value.as_number(line)?)),
        UnaryOperator::Not => Ok(Value::Bool(!value.as_bool(line)?)),
    }
}
