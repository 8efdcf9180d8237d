use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::Literal,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::function::Function},
};

/// Deepest list nesting rendered or compared element by element.
pub const MAX_DEPTH: usize = 16;

/// Relative tolerance used when comparing numbers with `=`.
pub const REL_TOLERANCE: f64 = 5e-10;

/// Represents a runtime value in the interpreter.
///
/// Lists are shared: copying a list value copies the reference, so a mutation
/// through one alias is visible through every other.
#[derive(Debug, Clone)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string of characters.
    Str(String),
    /// A boolean value (`true` or `false`).
    /// Produced by comparisons and logical operators. Conditions of `if` and
    /// `loop` must evaluate to `Bool`.
    Bool(bool),
    /// A mutable, shared list of values.
    List(Rc<RefCell<Vec<Self>>>),
    /// A callable value: a native or a lambda.
    Function(Rc<Function>),
    /// The empty placeholder, displayed as `null`.
    Nil,
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(RefCell::new(v)))
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Self::Function(Rc::new(f))
    }
}

impl From<&Literal> for Value {
    fn from(lit: &Literal) -> Self {
        match lit {
            Literal::Number(n) => (*n).into(),
            Literal::Str(s) => s.as_str().into(),
            Literal::Bool(b) => (*b).into(),
        }
    }
}

impl Value {
    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use lumen::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(10.0).as_number(1).unwrap(), 10.0);
    /// assert!(Value::from("10").as_number(1).is_err());
    /// ```
    pub fn as_number(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(RuntimeError::ExpectedNumber { found: self.to_string(),
                                                    line }),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for conditions and logical operators; there is no truthiness.
    pub fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { found: self.to_string(),
                                                     line }),
        }
    }

    /// Returns the shared list behind the value, or an error if not a list.
    pub fn as_list(&self, line: usize) -> EvalResult<&Rc<RefCell<Vec<Self>>>> {
        match self {
            Self::List(list) => Ok(list),
            _ => Err(RuntimeError::ExpectedList { found: self.to_string(),
                                                  line }),
        }
    }

    /// Copies out the elements of an enumerable value.
    ///
    /// Lists yield their current elements; strings yield one-character
    /// strings. The copy is a snapshot, later mutation of the list does not
    /// affect it.
    ///
    /// # Errors
    /// `NotIterable` for every other variant.
    pub fn elements(&self, line: usize) -> EvalResult<Vec<Self>> {
        match self {
            Self::List(list) => Ok(list.borrow().clone()),
            Self::Str(s) => Ok(s.chars().map(|c| Self::Str(c.to_string())).collect()),
            _ => Err(RuntimeError::NotIterable { found: self.to_string(),
                                                 line }),
        }
    }

    /// Name of the variant as shown in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Bool(_) => "boolean",
            Self::List(_) => "list",
            Self::Function(_) => "function",
            Self::Nil => "null",
        }
    }

    /// Compares two values with the semantics of the `=` operator.
    ///
    /// - Numbers are equal when identical or when their difference is tiny
    ///   relative to their magnitude.
    /// - Lists are equal element by element; the same list is equal to itself.
    /// - Functions are equal only to themselves.
    /// - Values of different variants are never equal.
    ///
    /// # Example
    /// ```
    /// use lumen::interpreter::value::core::Value;
    ///
    /// assert!(Value::Number(0.1 + 0.2).loosely_equals(&Value::Number(0.3)));
    /// assert!(Value::Number(0.0).loosely_equals(&Value::Number(0.0)));
    /// assert!(!Value::Number(1.0).loosely_equals(&Value::from("1")));
    /// ```
    #[must_use]
    pub fn loosely_equals(&self, other: &Self) -> bool {
        self.equals_at_depth(other, 0)
    }

    fn equals_at_depth(&self, other: &Self, depth: usize) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => numbers_equal(*a, *b),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Nil, Self::Nil) => true,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::List(a), Self::List(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                if depth >= MAX_DEPTH {
                    return false;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|(x, y)| x.equals_at_depth(y, depth + 1))
            },
            _ => false,
        }
    }

    fn fmt_at_depth(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Function(func) => write!(f, "{func}"),
            Self::Nil => write!(f, "null"),
            Self::List(_) if depth >= MAX_DEPTH => write!(f, "..."),
            Self::List(list) => {
                write!(f, "[ ")?;

                for (index, value) in list.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    value.fmt_at_depth(f, depth + 1)?;
                }

                write!(f, " ]")
            },
        }
    }
}

/// Exact equality first, so `0 = 0` holds, then the relative tolerance.
fn numbers_equal(a: f64, b: f64) -> bool {
    #[allow(clippy::float_cmp)]
    let exact = a == b;
    exact || (a - b).abs() / (a.abs() + b.abs()) < REL_TOLERANCE
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.loosely_equals(other)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_at_depth(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_display_uses_padded_brackets() {
        let list = Value::from(vec![Value::Number(1.0), Value::from("a"), Value::Nil]);
        assert_eq!(list.to_string(), "[ 1, a, null ]");
        assert_eq!(Value::from(Vec::new()).to_string(), "[  ]");
    }

    #[test]
    fn self_containing_list_display_is_bounded() {
        let list = Value::from(Vec::new());
        list.as_list(1).unwrap().borrow_mut().push(list.clone());
        let shown = list.to_string();
        assert!(shown.contains("..."));
        assert!(list.loosely_equals(&list.clone()));
    }

    #[test]
    fn numbers_render_without_trailing_zeros() {
        assert_eq!(Value::Number(120.0).to_string(), "120");
        assert_eq!(Value::Number(0.5).to_string(), "0.5");
        assert_eq!(Value::Number(-2.0).to_string(), "-2");
    }

    #[test]
    fn lists_compare_structurally() {
        let a = Value::from(vec![Value::Number(1.0), Value::from(vec![Value::Bool(true)])]);
        let b = Value::from(vec![Value::Number(1.0), Value::from(vec![Value::Bool(true)])]);
        let c = Value::from(vec![Value::Number(1.0)]);
        assert!(a.loosely_equals(&b));
        assert!(!a.loosely_equals(&c));
    }

    #[test]
    fn tolerance_is_relative() {
        assert!(numbers_equal(1e12, 1e12 + 1e-3));
        assert!(!numbers_equal(1.0, 1.001));
        assert!(!numbers_equal(0.0, 1e-300));
    }

    #[test]
    fn strings_enumerate_as_characters() {
        let chars = Value::from("ab").elements(1).unwrap();
        assert_eq!(chars, vec![Value::from("a"), Value::from("b")]);
        assert!(Value::Number(1.0).elements(1).is_err());
    }
}
