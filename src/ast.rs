use std::rc::Rc;

/// Represents a literal value in the language.
///
/// `Literal` covers the constants that can appear directly in source code.
/// Numeric literals are parsed eagerly by the lexer, so a literal that looks
/// numeric is always a `Number`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A double precision number such as `3`, `0.5` or `.25`.
    Number(f64),
    /// A string literal written between single quotes.
    Str(String),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// A complete parsed program: the ordered top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Statements executed in order by the interpreter.
    pub statements: Vec<Statement>,
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Expressions always produce a value. Every expression may also stand on its
/// own as a [`Statement::Expression`].
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant value.
    Literal {
        /// The constant value.
        value: Literal,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Re-assignment of an already declared name (`x := expr`).
    Assignment {
        /// Name being re-bound.
        name:  String,
        /// The new value.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Invocation of the function bound to a name (`f(a, b)`).
    Call {
        /// Name of the function being called.
        name:      String,
        /// Arguments, evaluated left to right.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Lambda construction (`x -> x * x` or `(a, b) -> { ... }`).
    Lambda {
        /// Parameter names, unique within the list.
        params: Vec<String>,
        /// The body executed on every call.
        body:   Rc<LambdaBody>,
        /// Line number in the source code.
        line:   usize,
    },
    /// List construction (`[a, b, c]`).
    List {
        /// Elements of the list.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// A prefix operation (`-x`, `not x`).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A block whose final entry is an expression; the block evaluates to
    /// that expression unless a `return` inside it fires first.
    Block {
        /// The block. Its `result` is always present.
        block: Block,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use lumen::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::Assignment { line, .. }
            | Self::Call { line, .. }
            | Self::Lambda { line, .. }
            | Self::List { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Block { line, .. } => *line,
        }
    }
}

/// The body of a lambda.
#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    /// A single expression whose value is the call result.
    Expression(Expr),
    /// A block. The call result is the value of a `return`, the trailing
    /// expression, or `null` when neither is reached.
    Block(Block),
}

/// A sequence of statements executed in a fresh frame.
///
/// When the last statement of a block is a bare expression the parser moves
/// it into `result`, which makes the block produce that value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// Statements preceding the trailing expression.
    pub statements: Vec<Statement>,
    /// The trailing expression, if the block ends in one.
    pub result:     Option<Box<Expr>>,
}

impl Block {
    /// Returns `true` when the block ends in a trailing expression.
    #[must_use]
    pub const fn yields_value(&self) -> bool {
        self.result.is_some()
    }
}

/// Represents a statement.
///
/// Statements may or may not produce a value; control-flow constructs report
/// their outcome to the enclosing construct.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A standalone expression evaluated for its effect.
    Expression(Expr),
    /// `let name := value`, binding a new name in the innermost frame.
    Initialization {
        /// The name of the variable.
        name:  String,
        /// The initial value of the variable.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `if (condition) body`.
    SingleConditional {
        /// Must evaluate to a boolean.
        condition: Expr,
        /// Executed when the condition is `true`.
        body:      Box<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `if (condition) then_branch else else_branch`.
    DoubleConditional {
        /// Must evaluate to a boolean.
        condition:   Expr,
        /// Executed when the condition is `true`.
        then_branch: Box<Self>,
        /// Executed when the condition is `false`.
        else_branch: Box<Self>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `for (let iterator : sequence) body`.
    Iteration {
        /// The loop variable name.
        iterator: String,
        /// Expression producing the enumerated sequence.
        sequence: Expr,
        /// Executed once per element.
        body:     Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `loop (condition) body`, re-testing the condition before every pass.
    Loop {
        /// Must evaluate to a boolean.
        condition: Expr,
        /// Executed while the condition holds.
        body:      Box<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `{ ... }` in statement position.
    Block(Block),
    /// `return value`.
    Return {
        /// The returned value.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`), right-associative.
    Pow,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equality (`=`), tolerant for numbers.
    Equal,
    /// Short-circuiting logical and (`and`)
    And,
    /// Short-circuiting logical or (`or`)
    Or,
}

/// Represents a prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical NOT (`not x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, Or, Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Pow => "^",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "=",
            And => "and",
            Or => "or",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "not"),
        }
    }
}

/// Wraps operands that would otherwise bind differently when printed.
struct Operand<'a>(&'a Expr);

impl std::fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Expr::BinaryOp { .. }
            | Expr::UnaryOp { .. }
            | Expr::Lambda { .. }
            | Expr::Assignment { .. } => write!(f, "({})", self.0),
            expr => write!(f, "{expr}"),
        }
    }
}

fn write_joined<T: std::fmt::Display>(f: &mut std::fmt::Formatter<'_>,
                                      items: &[T],
                                      separator: &str)
                                      -> std::fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, "{separator}")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "'{s}'"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Prints an expression back as source. Nested operators are parenthesized,
/// so the output shows how precedence was resolved.
///
/// # Example
/// ```
/// use lumen::{ast::Statement, parse};
///
/// let program = parse("not a = b or -c ^ 2").unwrap();
/// let Statement::Expression(expr) = &program.statements[0] else { panic!() };
///
/// assert_eq!(expr.to_string(), "(not (a = b)) or ((-c) ^ 2)");
/// ```
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Variable { name, .. } => write!(f, "{name}"),
            Self::Assignment { name, value, .. } => write!(f, "{name} := {value}"),
            Self::Call { name, arguments, .. } => {
                write!(f, "{name}(")?;
                write_joined(f, arguments, ", ")?;
                write!(f, ")")
            },
            Self::Lambda { params, body, .. } => {
                if let [param] = params.as_slice() {
                    write!(f, "{param} -> ")?;
                } else {
                    write!(f, "({}) -> ", params.join(", "))?;
                }
                match body.as_ref() {
                    LambdaBody::Expression(expr) => write!(f, "{expr}"),
                    LambdaBody::Block(block) => write!(f, "{block}"),
                }
            },
            Self::List { elements, .. } => {
                write!(f, "[")?;
                write_joined(f, elements, ", ")?;
                write!(f, "]")
            },
            Self::UnaryOp { op: UnaryOperator::Negate,
                            expr,
                            .. } => write!(f, "-{}", Operand(expr)),
            Self::UnaryOp { op: UnaryOperator::Not,
                            expr,
                            .. } => write!(f, "not {}", Operand(expr)),
            Self::BinaryOp { left, op, right, .. } => {
                write!(f, "{} {op} {}", Operand(left), Operand(right))
            },
            Self::Block { block, .. } => write!(f, "{block}"),
        }
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.statements.is_empty() && self.result.is_none() {
            return write!(f, "{{ }}");
        }

        write!(f, "{{ ")?;
        write_joined(f, &self.statements, "; ")?;
        if let Some(result) = &self.result {
            if !self.statements.is_empty() {
                write!(f, "; ")?;
            }
            write!(f, "{result}")?;
        }
        write!(f, " }}")
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expression(expr) => write!(f, "{expr}"),
            Self::Initialization { name, value, .. } => write!(f, "let {name} := {value}"),
            Self::SingleConditional { condition, body, .. } => {
                write!(f, "if ({condition}) {body}")
            },
            Self::DoubleConditional { condition,
                                      then_branch,
                                      else_branch,
                                      .. } => {
                write!(f, "if ({condition}) {then_branch} else {else_branch}")
            },
            Self::Iteration { iterator,
                              sequence,
                              body,
                              .. } => write!(f, "for (let {iterator} : {sequence}) {body}"),
            Self::Loop { condition, body, .. } => write!(f, "loop ({condition}) {body}"),
            Self::Block(block) => write!(f, "{block}"),
            Self::Return { value, .. } => write!(f, "return {value}"),
        }
    }
}

/// One statement per line.
impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_joined(f, &self.statements, "\n")
    }
}
