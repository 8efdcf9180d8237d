use std::{collections::HashMap, io::Write, rc::Rc};

use crate::{
    ast::{Block, Expr, Program, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::native::native_frame,
        value::{core::Value, function::Function},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The outcome of executing a statement.
///
/// Every construct that contains statements checks for `Returning` and stops
/// at once, handing the status up unchanged until a function call unwraps it.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// Finished without a value; continue with the next statement.
    Ok,
    /// A block finished on its trailing expression.
    OkWithValue(Value),
    /// A `return` fired.
    Returning(Value),
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the frame stack and the sink that
/// printing natives write to.
///
/// ## Usage
///
/// The bottom frame holds the native functions and is never removed. Programs
/// run in the frame above it, so a program may shadow a native by declaring
/// the same name.
///
/// ```
/// use lumen::interpreter::{
///     evaluator::core::Context, lexer::tokenize, parser::core::parse_program,
/// };
///
/// let program = parse_program(&tokenize("print(1 + 2 * 3)").unwrap()).unwrap();
/// let mut context = Context::new(Vec::<u8>::new());
///
/// context.execute_program(&program).unwrap();
/// assert_eq!(context.into_output(), b"7");
/// ```
pub struct Context<W: Write> {
    /// The frame stack, innermost frame last.
    pub frames: Vec<HashMap<String, Value>>,
    out:        W,
}

impl<W: Write> Context<W> {
    /// Creates a context whose program output goes to `out`.
    ///
    /// The stack starts with the native frame and one empty program frame.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { frames: vec![native_frame(), HashMap::new()],
               out }
    }

    /// Gives back the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs each top-level statement in order.
    ///
    /// A top-level `return` stops the program; the statements after it are
    /// skipped.
    ///
    /// # Errors
    /// Propagates the first `RuntimeError`; execution stops there.
    pub fn execute_program(&mut self, program: &Program) -> EvalResult<()> {
        for statement in &program.statements {
            if let Status::Returning(_) = self.execute(statement)? {
                break;
            }
        }
        Ok(())
    }

    /// Runs a library program, then opens a fresh frame for what follows.
    ///
    /// Names the library defines stay visible, and a later program may
    /// declare the same names without clashing.
    pub fn load_library(&mut self, library: &Program) -> EvalResult<()> {
        self.execute_program(library)?;
        self.frames.push(HashMap::new());
        Ok(())
    }

    /// Executes a single statement.
    ///
    /// # Returns
    /// The [`Status`] the statement finished with. Conditionals report the
    /// status of the branch they ran.
    pub fn execute(&mut self, statement: &Statement) -> EvalResult<Status> {
        match statement {
            Statement::Expression(expr) => {
                self.eval(expr)?;
                Ok(Status::Ok)
            },
            Statement::Initialization { name, value, line } => {
                let value = self.eval(value)?;
                self.declare(name, value, *line)?;
                Ok(Status::Ok)
            },
            Statement::SingleConditional { condition, body, .. } => {
                if self.eval_condition(condition)? {
                    self.execute(body)
                } else {
                    Ok(Status::Ok)
                }
            },
            Statement::DoubleConditional { condition,
                                           then_branch,
                                           else_branch,
                                           .. } => {
                if self.eval_condition(condition)? {
                    self.execute(then_branch)
                } else {
                    self.execute(else_branch)
                }
            },
            Statement::Iteration { iterator,
                                   sequence,
                                   body,
                                   line, } => self.execute_iteration(iterator, sequence, body, *line),
            Statement::Loop { condition, body, .. } => self.execute_loop(condition, body),
            Statement::Block(block) => self.execute_block(block),
            Statement::Return { value, .. } => Ok(Status::Returning(self.eval(value)?)),
        }
    }

    /// Executes a block in a fresh frame.
    ///
    /// The frame is popped on every exit path, including errors and `return`.
    pub fn execute_block(&mut self, block: &Block) -> EvalResult<Status> {
        self.in_frame(HashMap::new(), |ctx| {
                for statement in &block.statements {
                    if let returning @ Status::Returning(_) = ctx.execute(statement)? {
                        return Ok(returning);
                    }
                }

                match &block.result {
                    Some(expr) => Ok(Status::OkWithValue(ctx.eval(expr)?)),
                    None => Ok(Status::Ok),
                }
            })
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant.
    ///
    /// # Errors
    /// Any `RuntimeError` raised while evaluating `expr` or its children.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(value.into()),
            Expr::Variable { name, line } => self.lookup(name, *line),
            Expr::Assignment { name, value, line } => {
                let value = self.eval(value)?;
                self.assign_nearest(name, value.clone(), *line)?;
                Ok(value)
            },
            Expr::Call { name,
                         arguments,
                         line, } => self.eval_call(name, arguments, *line),
            Expr::Lambda { params, body, .. } => {
                Ok(Function::lambda(params.clone(), Rc::clone(body)).into())
            },
            Expr::List { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.eval(element))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(values.into())
            },
            Expr::UnaryOp { op, expr, line } => self.eval_unary_op(*op, expr, *line),
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => self.eval_binary_op(left, *op, right, *line),
            Expr::Block { block, line } => match self.execute_block(block)? {
                Status::OkWithValue(value) | Status::Returning(value) => Ok(value),
                Status::Ok => Err(RuntimeError::MissingValue { line: *line }),
            },
        }
    }

    /// Mutable access to the output sink, as handed to natives.
    pub(crate) fn output(&mut self) -> &mut W {
        &mut self.out
    }

    /// Evaluates a condition, which must produce a boolean.
    pub(crate) fn eval_condition(&mut self, condition: &Expr) -> EvalResult<bool> {
        self.eval(condition)?.as_bool(condition.line_number())
    }
}
