use std::rc::Rc;

use crate::{
    ast::{Expr, LambdaBody, Literal},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{Parsed, ParseResult, Rule, TokenStream, first_of},
            operator::parse_expression,
            utils::{parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a value: the operand of an operator expression.
///
/// Alternatives are tried in this order, so keywords and literals win over
/// names and an assignment wins over a bare reference:
///
/// ```text
///     value := literal
///            | IDENT ":=" expression
///            | IDENT "(" (expression ("," expression)*)? ")"
///            | "[" (expression ("," expression)*)? "]"
///            | lambda
///            | block            (only if it ends in an expression)
///            | IDENT
/// ```
///
/// # Errors
/// Returns the failure of the alternative that got furthest.
pub fn parse_value(tokens: TokenStream<'_>) -> ParseResult<'_, Expr> {
    let rules: [Rule<'_, Expr>; 7] = [parse_literal as Rule<'_, _>,
                                      parse_assignment as Rule<'_, _>,
                                      parse_call as Rule<'_, _>,
                                      parse_list as Rule<'_, _>,
                                      parse_lambda as Rule<'_, _>,
                                      parse_block_value as Rule<'_, _>,
                                      parse_variable as Rule<'_, _>];
    first_of(tokens, &rules)
}

fn parse_literal(tokens: TokenStream<'_>) -> ParseResult<'_, Expr> {
    let value = match tokens.peek() {
        Some(Token::Number(n)) => Literal::Number(*n),
        Some(Token::Str(s)) => Literal::Str(s.clone()),
        Some(Token::True) => Literal::Bool(true),
        Some(Token::False) => Literal::Bool(false),
        _ => return tokens.fail(),
    };

    Ok(Parsed::new(Expr::Literal { value,
                                   line: tokens.line() },
                   tokens.advance(1)))
}

fn parse_assignment(tokens: TokenStream<'_>) -> ParseResult<'_, Expr> {
    let line = tokens.line();
    let Parsed { value: name, rest } = parse_identifier(tokens)?;
    let Parsed { rest, .. } = rest.expect(&Token::Assign)?;
    let Parsed { value, rest } = parse_expression(rest).map_err(|e| e.within("assignment"))?;

    Ok(Parsed::new(Expr::Assignment { name,
                                      value: Box::new(value),
                                      line },
                   rest))
}

fn parse_call(tokens: TokenStream<'_>) -> ParseResult<'_, Expr> {
    let line = tokens.line();
    let Parsed { value: name, rest } = parse_identifier(tokens)?;
    let Parsed { rest, .. } = rest.expect(&Token::LParen)?;
    let Parsed { value: arguments, rest } =
        parse_comma_separated(rest, parse_expression, &Token::RParen)
            .map_err(|e| e.within("invocation"))?;

    Ok(Parsed::new(Expr::Call { name,
                                arguments,
                                line },
                   rest))
}

fn parse_list(tokens: TokenStream<'_>) -> ParseResult<'_, Expr> {
    let line = tokens.line();
    let Parsed { rest, .. } = tokens.expect(&Token::LBracket)?;
    let Parsed { value: elements, rest } =
        parse_comma_separated(rest, parse_expression, &Token::RBracket)
            .map_err(|e| e.within("list"))?;

    Ok(Parsed::new(Expr::List { elements, line }, rest))
}

/// Parses a lambda.
///
/// Grammar:
/// ```text
///     lambda := (IDENT | "(" (IDENT ("," IDENT)*)? ")") "->" (block | expression)
/// ```
///
/// A body starting with `{` is a block; anything else is a single expression.
///
/// # Errors
/// - `DuplicateParameter` if a name appears twice in the parameter list.
/// - Propagates any errors from parsing the body.
fn parse_lambda(tokens: TokenStream<'_>) -> ParseResult<'_, Expr> {
    let line = tokens.line();
    let params_rules: [Rule<'_, Vec<String>>; 2] = [parse_single_param as Rule<'_, _>, parse_params as Rule<'_, _>];
    let Parsed { value: params, rest } = first_of(tokens, &params_rules)?;
    let Parsed { rest, .. } = rest.expect(&Token::Arrow)?;

    for (i, name) in params.iter().enumerate() {
        if params[..i].contains(name) {
            return Err(ParseError::DuplicateParameter { name: name.clone(),
                                                        line });
        }
    }

    let Parsed { value: body, rest } = parse_lambda_body(rest).map_err(|e| e.within("lambda"))?;

    Ok(Parsed::new(Expr::Lambda { params,
                                  body: Rc::new(body),
                                  line },
                   rest))
}

fn parse_single_param(tokens: TokenStream<'_>) -> ParseResult<'_, Vec<String>> {
    parse_identifier(tokens).map(|parsed| parsed.map(|name| vec![name]))
}

fn parse_params(tokens: TokenStream<'_>) -> ParseResult<'_, Vec<String>> {
    let Parsed { rest, .. } = tokens.expect(&Token::LParen)?;
    parse_comma_separated(rest, parse_identifier, &Token::RParen)
}

fn parse_lambda_body(tokens: TokenStream<'_>) -> ParseResult<'_, LambdaBody> {
    if let Some(Token::LBrace) = tokens.peek() {
        parse_block(tokens).map(|parsed| parsed.map(LambdaBody::Block))
    } else {
        parse_expression(tokens).map(|parsed| parsed.map(LambdaBody::Expression))
    }
}

fn parse_block_value(tokens: TokenStream<'_>) -> ParseResult<'_, Expr> {
    let line = tokens.line();
    let Parsed { value: block, rest } = parse_block(tokens)?;

    if !block.yields_value() {
        return tokens.fail();
    }

    Ok(Parsed::new(Expr::Block { block, line }, rest))
}

fn parse_variable(tokens: TokenStream<'_>) -> ParseResult<'_, Expr> {
    let line = tokens.line();
    parse_identifier(tokens).map(|parsed| parsed.map(|name| Expr::Variable { name, line }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn value(source: &str) -> Result<Expr, ParseError> {
        let tokens = tokenize(source).unwrap();
        parse_value(TokenStream::new(&tokens)).map(|parsed| parsed.value)
    }

    #[test]
    fn keyword_literals_win_over_identifiers() {
        assert_eq!(value("true").unwrap(),
                   Expr::Literal { value: Literal::Bool(true),
                                   line:  1, });
    }

    #[test]
    fn assignment_wins_over_plain_reference() {
        assert!(matches!(value("x := 1").unwrap(), Expr::Assignment { .. }));
        assert!(matches!(value("x").unwrap(), Expr::Variable { .. }));
    }

    #[test]
    fn lambda_forms() {
        let Expr::Lambda { params, body, .. } = value("x -> x * x").unwrap() else {
            panic!("expected lambda");
        };
        assert_eq!(params, vec!["x"]);
        assert!(matches!(*body, LambdaBody::Expression(_)));

        let Expr::Lambda { params, body, .. } = value("(a, b) -> { return a }").unwrap() else {
            panic!("expected lambda");
        };
        assert_eq!(params, vec!["a", "b"]);
        assert!(matches!(*body, LambdaBody::Block(_)));

        assert!(matches!(value("() -> 1").unwrap(), Expr::Lambda { .. }));
    }

    #[test]
    fn duplicate_parameters_are_rejected() {
        assert_eq!(value("(a, a) -> a"),
                   Err(ParseError::DuplicateParameter { name: "a".to_string(),
                                                        line: 1, }));
    }

    #[test]
    fn block_without_trailing_expression_is_no_value() {
        assert!(value("{ let x := 1 }").is_err());
        assert!(matches!(value("{ let x := 1 x }").unwrap(), Expr::Block { .. }));
    }

    #[test]
    fn empty_list_and_call() {
        assert!(matches!(value("[]").unwrap(), Expr::List { elements, .. } if elements.is_empty()));
        assert!(matches!(value("f()").unwrap(), Expr::Call { arguments, .. } if arguments.is_empty()));
    }
}
