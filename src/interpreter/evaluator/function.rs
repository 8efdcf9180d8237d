use std::io::Write;

use crate::{
    ast::{Expr, LambdaBody},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Status},
        value::{
            core::Value,
            function::{Function, FunctionBody},
        },
    },
};

impl<W: Write> Context<W> {
    /// Evaluates an invocation `name(arguments...)`.
    ///
    /// The callee is resolved first, then the arguments are evaluated left to
    /// right.
    ///
    /// # Errors
    /// - `UnknownVariable` if `name` is unbound.
    /// - `NotCallable` if `name` is bound to something other than a function.
    /// - Anything the call itself raises.
    pub(crate) fn eval_call(&mut self,
                            name: &str,
                            arguments: &[Expr],
                            line: usize)
                            -> EvalResult<Value> {
        let function = match self.lookup(name, line)? {
            Value::Function(function) => function,
            other => {
                return Err(RuntimeError::NotCallable { name: name.to_string(),
                                                       value: other.to_string(),
                                                       line });
            },
        };

        let args = arguments.iter()
                            .map(|argument| self.eval(argument))
                            .collect::<EvalResult<Vec<_>>>()?;

        self.call_function(&function, args, line)
    }

    /// Calls a function value with already evaluated arguments.
    ///
    /// A lambda runs in a new frame binding each parameter positionally. Its
    /// free names resolve against the frames active at the time of the call,
    /// not those where the lambda was written. The call result is:
    ///
    /// - the value of the body, for an expression-bodied lambda;
    /// - the value of a `return`, or else the trailing expression, for a
    ///   block-bodied lambda;
    /// - `null` if a block body finishes without either.
    ///
    /// # Errors
    /// `ArgumentCountMismatch` if the argument count does not fit, and
    /// anything the body raises.
    pub fn call_function(&mut self,
                         function: &Function,
                         args: Vec<Value>,
                         line: usize)
                         -> EvalResult<Value> {
        function.check_arity(args.len(), line)?;

        match &function.body {
            FunctionBody::Native { func, .. } => func(&args, self.output(), line),
            FunctionBody::Lambda(body) => {
                let frame = function.params.iter().cloned().zip(args).collect();

                self.in_frame(frame, |ctx| match body.as_ref() {
                        LambdaBody::Expression(expr) => ctx.eval(expr),
                        LambdaBody::Block(block) => match ctx.execute_block(block)? {
                            Status::Returning(value) | Status::OkWithValue(value) => Ok(value),
                            Status::Ok => Ok(Value::Nil),
                        },
                    })
            },
        }
    }
}
