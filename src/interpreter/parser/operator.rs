use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{Parsed, ParseResult, Rule, TokenStream, first_of},
            expression::parse_value,
        },
    },
};

/// An operand as it appears in source, before precedence is applied.
#[derive(Debug, Clone, PartialEq)]
enum Operand {
    /// A value such as a literal, call or lambda.
    Value(Expr),
    /// A parenthesized sub-expression, resolved on its own.
    Group(Box<FlatExpr>),
    /// A prefix operator applied to the operand that follows it.
    Prefix {
        op:      UnaryOperator,
        operand: Box<Self>,
        line:    usize,
    },
}

/// An operator expression in source order: `head (op operand)*`.
#[derive(Debug, Clone, PartialEq)]
struct FlatExpr {
    head: Operand,
    tail: Vec<(BinaryOperator, usize, Operand)>,
}

/// Parses an operator expression.
///
/// This is the entry point for expression parsing. Operands and operators are
/// first collected in source order and then resolved into a tree.
///
/// Grammar:
/// ```text
///     expression := operand (binary_op operand)*
///     operand    := value | "(" expression ")" | ("not" | "-") operand
/// ```
///
/// Once a binary operator has been consumed the following operand is
/// mandatory, so its failure is reported as is.
///
/// # Errors
/// Returns a `ParseError` if no operand can be parsed, or if the collected
/// sequence cannot be reduced.
///
/// # Example
/// ```
/// use lumen::{
///     ast::{BinaryOperator, Expr},
///     interpreter::{
///         lexer::tokenize,
///         parser::{core::TokenStream, operator::parse_expression},
///     },
/// };
///
/// let tokens = tokenize("1 + 2 * 3").unwrap();
/// let parsed = parse_expression(TokenStream::new(&tokens)).unwrap();
///
/// let Expr::BinaryOp { op, right, .. } = parsed.value else { panic!() };
/// assert_eq!(op, BinaryOperator::Add);
/// assert!(matches!(*right, Expr::BinaryOp { op: BinaryOperator::Mul, .. }));
/// ```
pub fn parse_expression(tokens: TokenStream<'_>) -> ParseResult<'_, Expr> {
    let line = tokens.line();
    let Parsed { value: flat, rest } = parse_flat(tokens)?;

    Ok(Parsed::new(Resolver::resolve(flat, line)?, rest))
}

fn parse_flat(tokens: TokenStream<'_>) -> ParseResult<'_, FlatExpr> {
    let Parsed { value: head, mut rest } = parse_operand(tokens)?;
    let mut tail = Vec::new();

    while let Some(op) = rest.peek().and_then(binary_operator) {
        let line = rest.line();
        let Parsed { value: operand, rest: after } =
            parse_operand(rest.advance(1)).map_err(|e| e.within("operand"))?;
        tail.push((op, line, operand));
        rest = after;
    }

    Ok(Parsed::new(FlatExpr { head, tail }, rest))
}

fn parse_operand(tokens: TokenStream<'_>) -> ParseResult<'_, Operand> {
    let rules: [Rule<'_, Operand>; 3] = [parse_value_operand as Rule<'_, _>, parse_group as Rule<'_, _>, parse_prefix as Rule<'_, _>];
    first_of(tokens, &rules)
}

fn parse_value_operand(tokens: TokenStream<'_>) -> ParseResult<'_, Operand> {
    parse_value(tokens).map(|parsed| parsed.map(Operand::Value))
}

fn parse_group(tokens: TokenStream<'_>) -> ParseResult<'_, Operand> {
    let Parsed { rest, .. } = tokens.expect(&Token::LParen)?;
    let Parsed { value: flat, rest } = parse_flat(rest).map_err(|e| e.within("group"))?;
    let Parsed { rest, .. } = rest.expect(&Token::RParen)
                                  .map_err(|e| e.within("group"))?;

    Ok(Parsed::new(Operand::Group(Box::new(flat)), rest))
}

fn parse_prefix(tokens: TokenStream<'_>) -> ParseResult<'_, Operand> {
    let op = match tokens.peek() {
        Some(Token::Minus) => UnaryOperator::Negate,
        Some(Token::Not) => UnaryOperator::Not,
        _ => return tokens.fail(),
    };
    let line = tokens.line();
    let Parsed { value: operand, rest } = parse_operand(tokens.advance(1))?;

    Ok(Parsed::new(Operand::Prefix { op,
                                     operand: Box::new(operand),
                                     line },
                   rest))
}

const fn binary_operator(token: &Token) -> Option<BinaryOperator> {
    let op = match token {
        Token::Plus => BinaryOperator::Add,
        Token::Minus => BinaryOperator::Sub,
        Token::Star => BinaryOperator::Mul,
        Token::Slash => BinaryOperator::Div,
        Token::Caret => BinaryOperator::Pow,
        Token::Less => BinaryOperator::Less,
        Token::Greater => BinaryOperator::Greater,
        Token::LessEqual => BinaryOperator::LessEqual,
        Token::GreaterEqual => BinaryOperator::GreaterEqual,
        Token::Equals => BinaryOperator::Equal,
        Token::And => BinaryOperator::And,
        Token::Or => BinaryOperator::Or,
        _ => return None,
    };
    Some(op)
}

/// Binding strength of a binary operator. Higher binds tighter.
///
/// | Level | Operators              |
/// |-------|------------------------|
/// | 1     | `or`                   |
/// | 2     | `and`                  |
/// | 4     | `=`                    |
/// | 5     | `<` `>` `<=` `>=`      |
/// | 6     | `+` `-`                |
/// | 7     | `*` `/`                |
/// | 8     | `^` (right-associative)|
#[must_use]
pub const fn binary_precedence(op: BinaryOperator) -> u8 {
    match op {
        BinaryOperator::Or => 1,
        BinaryOperator::And => 2,
        BinaryOperator::Equal => 4,
        BinaryOperator::Less
        | BinaryOperator::Greater
        | BinaryOperator::LessEqual
        | BinaryOperator::GreaterEqual => 5,
        BinaryOperator::Add | BinaryOperator::Sub => 6,
        BinaryOperator::Mul | BinaryOperator::Div => 7,
        BinaryOperator::Pow => 8,
    }
}

/// Binding strength of a prefix operator: `not` sits between `and` and `=`,
/// negation binds tighter than every binary operator.
#[must_use]
pub const fn unary_precedence(op: UnaryOperator) -> u8 {
    match op {
        UnaryOperator::Not => 3,
        UnaryOperator::Negate => 9,
    }
}

#[derive(Debug, Clone, Copy)]
enum Pending {
    Binary(BinaryOperator, usize),
    Unary(UnaryOperator, usize),
}

impl Pending {
    const fn precedence(self) -> u8 {
        match self {
            Self::Binary(op, _) => binary_precedence(op),
            Self::Unary(op, _) => unary_precedence(op),
        }
    }

    /// Whether `self`, on top of the operator stack, must be reduced before
    /// `incoming` is pushed.
    const fn reduces_before(self, incoming: Self) -> bool {
        match (self, incoming) {
            // A prefix operator has no operand yet when the next one arrives.
            (_, Self::Unary(..)) => false,
            (Self::Unary(..), Self::Binary(..)) => self.precedence() >= incoming.precedence(),
            (Self::Binary(..), Self::Binary(op, _)) => {
                self.precedence() > incoming.precedence()
                || (self.precedence() == incoming.precedence()
                    && !matches!(op, BinaryOperator::Pow))
            },
        }
    }
}

/// Operator-precedence reduction over a flat expression.
struct Resolver {
    operators: Vec<Pending>,
    operands:  Vec<Expr>,
    line:      usize,
}

impl Resolver {
    fn resolve(flat: FlatExpr, line: usize) -> Result<Expr, ParseError> {
        let mut resolver = Self { operators: Vec::new(),
                                  operands: Vec::new(),
                                  line };

        resolver.push_operand(flat.head)?;
        for (op, op_line, operand) in flat.tail {
            resolver.push_operator(Pending::Binary(op, op_line))?;
            resolver.push_operand(operand)?;
        }
        while !resolver.operators.is_empty() {
            resolver.reduce()?;
        }

        match (resolver.operands.pop(), resolver.operands.is_empty()) {
            (Some(expr), true) => Ok(expr),
            _ => Err(ParseError::MalformedExpression { line }),
        }
    }

    fn push_operand(&mut self, operand: Operand) -> Result<(), ParseError> {
        match operand {
            Operand::Value(expr) => self.operands.push(expr),
            Operand::Group(flat) => self.operands.push(Self::resolve(*flat, self.line)?),
            Operand::Prefix { op, operand, line } => {
                self.push_operator(Pending::Unary(op, line))?;
                self.push_operand(*operand)?;
            },
        }
        Ok(())
    }

    fn push_operator(&mut self, incoming: Pending) -> Result<(), ParseError> {
        while let Some(&top) = self.operators.last()
              && top.reduces_before(incoming)
        {
            self.reduce()?;
        }
        self.operators.push(incoming);
        Ok(())
    }

    fn reduce(&mut self) -> Result<(), ParseError> {
        let malformed = ParseError::MalformedExpression { line: self.line };
        let (Some(pending), Some(right)) = (self.operators.pop(), self.operands.pop()) else {
            return Err(malformed);
        };

        let expr = match pending {
            Pending::Binary(op, line) => {
                let left = self.operands.pop().ok_or(malformed)?;
                Expr::BinaryOp { left: Box::new(left),
                                 op,
                                 right: Box::new(right),
                                 line }
            },
            Pending::Unary(op, line) => Expr::UnaryOp { op,
                                                        expr: Box::new(right),
                                                        line },
        };
        self.operands.push(expr);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn parse(source: &str) -> Expr {
        let tokens = tokenize(source).unwrap();
        let parsed = parse_expression(TokenStream::new(&tokens)).unwrap();
        assert!(parsed.rest.is_empty(), "unconsumed input in {source}");
        parsed.value
    }

    fn shape(expr: &Expr) -> String {
        match expr {
            Expr::BinaryOp { left, op, right, .. } => {
                format!("({} {op} {})", shape(left), shape(right))
            },
            Expr::UnaryOp { op, expr, .. } => format!("({op} {})", shape(expr)),
            Expr::Literal { value, .. } => format!("{value:?}"),
            Expr::Variable { name, .. } => name.clone(),
            other => format!("{other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(shape(&parse("a + b * c")), "(a + (b * c))");
        assert_eq!(shape(&parse("a * b + c")), "((a * b) + c)");
    }

    #[test]
    fn same_level_is_left_associative() {
        assert_eq!(shape(&parse("a - b - c")), "((a - b) - c)");
        assert_eq!(shape(&parse("a / b * c")), "((a / b) * c)");
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(shape(&parse("a ^ b ^ c")), "(a ^ (b ^ c))");
    }

    #[test]
    fn negation_binds_tighter_than_power() {
        assert_eq!(shape(&parse("-a ^ b")), "((- a) ^ b)");
        assert_eq!(shape(&parse("a - -b")), "(a - (- b))");
    }

    #[test]
    fn not_sits_between_and_and_equality() {
        assert_eq!(shape(&parse("not a or b")), "((not a) or b)");
        assert_eq!(shape(&parse("not a = b")), "(not (a = b))");
        assert_eq!(shape(&parse("a and not b")), "(a and (not b))");
    }

    #[test]
    fn stacked_prefixes_apply_innermost_first() {
        assert_eq!(shape(&parse("not not a")), "(not (not a))");
        assert_eq!(shape(&parse("- - a")), "(- (- a))");
    }

    #[test]
    fn groups_override_precedence() {
        assert_eq!(shape(&parse("(a + b) * c")), "((a + b) * c)");
        assert_eq!(shape(&parse("((a))")), "a");
    }

    #[test]
    fn missing_operand_after_operator_is_reported_there() {
        let tokens = tokenize("1 + * 2").unwrap();
        let err = parse_expression(TokenStream::new(&tokens)).unwrap_err();
        assert_eq!(err.index(), 2);
    }
}
