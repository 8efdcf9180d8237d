use std::{io::Write, rc::Rc};

use crate::{
    ast::LambdaBody,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Signature of a native function.
///
/// Natives receive their evaluated arguments, the program's output sink, and
/// the line of the call for error reporting.
pub type NativeFn = fn(&[Value], &mut dyn Write, usize) -> EvalResult<Value>;

/// The number of arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` arguments.
    Exact(usize),
    /// Any of the listed counts.
    OneOf(&'static [usize]),
    /// `n` or more arguments.
    AtLeast(usize),
}

impl Arity {
    /// Returns `true` if `count` arguments satisfy the arity.
    ///
    /// # Example
    /// ```
    /// use lumen::interpreter::value::function::Arity;
    ///
    /// assert!(Arity::OneOf(&[1, 2]).accepts(2));
    /// assert!(!Arity::Exact(1).accepts(0));
    /// assert!(Arity::AtLeast(1).accepts(4));
    /// ```
    #[must_use]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exact(n) => count == n,
            Self::OneOf(counts) => counts.contains(&count),
            Self::AtLeast(n) => count >= n,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
            Self::OneOf(counts) => {
                let counts: Vec<String> = counts.iter().map(ToString::to_string).collect();
                write!(f, "{}", counts.join(" or "))
            },
        }
    }
}

/// What runs when a function is called.
#[derive(Debug)]
pub enum FunctionBody {
    /// A function implemented in Rust.
    Native {
        /// Accepted argument counts.
        arity: Arity,
        /// The implementation.
        func:  NativeFn,
    },
    /// A lambda written in the language. Its parameters bind positionally.
    Lambda(Rc<LambdaBody>),
}

/// A callable value.
///
/// Natives and lambdas share this representation, so a native can be passed
/// around, stored in lists, and compared like any lambda.
#[derive(Debug)]
pub struct Function {
    /// Name used in diagnostics and display. Lambdas are anonymous and show
    /// as `λ`.
    pub name:   String,
    /// Parameter names. For natives these only document the arguments.
    pub params: Vec<String>,
    /// The code that runs on a call.
    pub body:   FunctionBody,
}

impl Function {
    /// Creates a native function.
    #[must_use]
    pub fn native(name: &str, params: &[&str], arity: Arity, func: NativeFn) -> Self {
        Self { name:   name.to_string(),
               params: params.iter().map(ToString::to_string).collect(),
               body:   FunctionBody::Native { arity, func }, }
    }

    /// Creates an anonymous lambda.
    #[must_use]
    pub fn lambda(params: Vec<String>, body: Rc<LambdaBody>) -> Self {
        Self { name: "λ".to_string(),
               params,
               body: FunctionBody::Lambda(body) }
    }

    /// Returns the accepted argument counts.
    #[must_use]
    pub fn arity(&self) -> Arity {
        match &self.body {
            FunctionBody::Native { arity, .. } => *arity,
            FunctionBody::Lambda(_) => Arity::Exact(self.params.len()),
        }
    }

    /// Verifies that `found` arguments may be passed.
    ///
    /// # Errors
    /// `ArgumentCountMismatch` naming the accepted arity otherwise.
    pub fn check_arity(&self, found: usize, line: usize) -> EvalResult<()> {
        let arity = self.arity();
        if arity.accepts(found) {
            return Ok(());
        }
        Err(RuntimeError::ArgumentCountMismatch { name: self.name.clone(),
                                                  expected: arity.to_string(),
                                                  found,
                                                  line })
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.params.join(", "))
    }
}
