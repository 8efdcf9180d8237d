use std::io::Write;

use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl<W: Write> Context<W> {
    /// Evaluates a binary operation.
    ///
    /// `or` and `and` short-circuit: the right operand is evaluated only when
    /// the left one does not already decide the result. Every other operator
    /// evaluates both operands, left first.
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 line: usize)
                                 -> EvalResult<Value> {
        match op {
            BinaryOperator::Or => {
                if self.eval(left)?.as_bool(line)? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval(right)?.as_bool(line)?))
            },
            BinaryOperator::And => {
                if !self.eval(left)?.as_bool(line)? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval(right)?.as_bool(line)?))
            },
            _ => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                apply_binary(op, &left, &right, line)
            },
        }
    }
}

/// Applies a binary operator to two evaluated operands.
///
/// - Arithmetic (`+ - * / ^`) and ordering (`< > <= >=`) require numbers.
///   Division follows IEEE 754, so dividing by zero yields an infinity.
/// - `=` accepts any values and uses [`Value::loosely_equals`].
/// - `and`/`or` require booleans.
///
/// # Errors
/// `TypeError` naming the operator and both operands when they do not fit.
///
/// # Example
/// ```
/// use lumen::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::apply_binary, value::core::Value},
/// };
///
/// let eight = apply_binary(BinaryOperator::Pow, &2.0.into(), &3.0.into(), 1).unwrap();
/// assert_eq!(eight, Value::Number(8.0));
///
/// assert!(apply_binary(BinaryOperator::Add, &1.0.into(), &"1".into(), 1).is_err());
/// ```
pub fn apply_binary(op: BinaryOperator,
                    left: &Value,
                    right: &Value,
                    line: usize)
                    -> EvalResult<Value> {
    use BinaryOperator::{
        Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, Or, Pow, Sub,
    };

    match op {
        Equal => Ok(Value::Bool(left.loosely_equals(right))),
        And | Or => {
            let (Value::Bool(a), Value::Bool(b)) = (left, right) else {
                return Err(type_error(op, left, right, line));
            };
            Ok(Value::Bool(if op == And { *a && *b } else { *a || *b }))
        },
        Add | Sub | Mul | Div | Pow => {
            let (a, b) = numbers(op, left, right, line)?;
            Ok(Value::Number(arithmetic(op, a, b)))
        },
        Less | Greater | LessEqual | GreaterEqual => {
            let (a, b) = numbers(op, left, right, line)?;
            Ok(Value::Bool(compare(op, a, b)))
        },
    }
}

fn numbers(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> EvalResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(type_error(op, left, right, line)),
    }
}

fn arithmetic(op: BinaryOperator, a: f64, b: f64) -> f64 {
    match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div => a / b,
        _ => a.powf(b),
    }
}

fn compare(op: BinaryOperator, a: f64, b: f64) -> bool {
    match op {
        BinaryOperator::Less => a < b,
        BinaryOperator::Greater => a > b,
        BinaryOperator::LessEqual => a <= b,
        _ => a >= b,
    }
}

fn type_error(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> RuntimeError {
    RuntimeError::TypeError { details: format!("cannot apply '{op}' to {left} ({}) and {right} ({})",
                                               left.type_name(),
                                               right.type_name()),
                              line }
}
