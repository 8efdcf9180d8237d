use crate::{
    ast::{Expr, Statement},
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{Parsed, ParseResult, Rule, TokenStream, first_of},
            operator::parse_expression,
            utils::parse_identifier,
        },
    },
};

/// Parses a single statement.
///
/// A statement starting with `{` is a block. Otherwise the alternatives are
/// tried in order and the first one that matches wins:
///
/// ```text
///     statement := "return" expression
///                | block
///                | "let" IDENT ":=" expression
///                | "if" "(" expression ")" statement ("else" statement)?
///                | "loop" "(" expression ")" statement
///                | "for" "(" "let" IDENT ":" expression ")" statement
///                | expression
/// ```
///
/// # Errors
/// Returns the failure of the alternative that got furthest.
pub fn parse_statement(tokens: TokenStream<'_>) -> ParseResult<'_, Statement> {
    // A leading `{` is only ever a block statement, never a value block.
    if let Some(Token::LBrace) = tokens.peek() {
        return parse_block_statement(tokens);
    }

    let rules: [Rule<'_, Statement>; 6] = [parse_return as Rule<'_, _>,
                                           parse_initialization as Rule<'_, _>,
                                           parse_conditional as Rule<'_, _>,
                                           parse_loop as Rule<'_, _>,
                                           parse_iteration as Rule<'_, _>,
                                           parse_expression_statement as Rule<'_, _>];
    first_of(tokens, &rules)
}

fn parse_return(tokens: TokenStream<'_>) -> ParseResult<'_, Statement> {
    let line = tokens.line();
    let Parsed { rest, .. } = tokens.expect(&Token::Return)?;
    let Parsed { value, rest } = parse_expression(rest).map_err(|e| e.within("return"))?;

    Ok(Parsed::new(Statement::Return { value, line }, rest))
}

fn parse_block_statement(tokens: TokenStream<'_>) -> ParseResult<'_, Statement> {
    parse_block(tokens).map(|parsed| parsed.map(Statement::Block))
}

fn parse_initialization(tokens: TokenStream<'_>) -> ParseResult<'_, Statement> {
    let line = tokens.line();
    let Parsed { rest, .. } = tokens.expect(&Token::Let)?;
    let Parsed { value: name, rest } = parse_identifier(rest).map_err(|e| e.within("let"))?;
    let Parsed { rest, .. } = rest.expect(&Token::Assign)
                                  .map_err(|e| e.within("let"))?;
    let Parsed { value, rest } = parse_expression(rest).map_err(|e| e.within("let"))?;

    Ok(Parsed::new(Statement::Initialization { name, value, line }, rest))
}

/// Parses `if (condition) statement` with an optional `else statement`.
///
/// An `else` always attaches to the nearest unmatched `if`.
fn parse_conditional(tokens: TokenStream<'_>) -> ParseResult<'_, Statement> {
    let line = tokens.line();
    let Parsed { rest, .. } = tokens.expect(&Token::If)?;
    let Parsed { value: condition, rest } =
        parse_condition(rest).map_err(|e| e.within("if"))?;
    let Parsed { value: then_branch, rest } =
        parse_statement(rest).map_err(|e| e.within("if"))?;

    if let Ok(Parsed { rest, .. }) = rest.expect(&Token::Else) {
        let Parsed { value: else_branch, rest } =
            parse_statement(rest).map_err(|e| e.within("else"))?;
        let statement = Statement::DoubleConditional { condition,
                                                       then_branch: Box::new(then_branch),
                                                       else_branch: Box::new(else_branch),
                                                       line };
        return Ok(Parsed::new(statement, rest));
    }

    Ok(Parsed::new(Statement::SingleConditional { condition,
                                                  body: Box::new(then_branch),
                                                  line },
                   rest))
}

fn parse_loop(tokens: TokenStream<'_>) -> ParseResult<'_, Statement> {
    let line = tokens.line();
    let Parsed { rest, .. } = tokens.expect(&Token::Loop)?;
    let Parsed { value: condition, rest } =
        parse_condition(rest).map_err(|e| e.within("loop"))?;
    let Parsed { value: body, rest } = parse_statement(rest).map_err(|e| e.within("loop"))?;

    Ok(Parsed::new(Statement::Loop { condition,
                                     body: Box::new(body),
                                     line },
                   rest))
}

fn parse_iteration(tokens: TokenStream<'_>) -> ParseResult<'_, Statement> {
    let line = tokens.line();
    let Parsed { rest, .. } = tokens.expect(&Token::For)?;
    let Parsed { value: (iterator, sequence), rest } =
        parse_iteration_header(rest).map_err(|e| e.within("for"))?;
    let Parsed { value: body, rest } = parse_statement(rest).map_err(|e| e.within("for"))?;

    Ok(Parsed::new(Statement::Iteration { iterator,
                                          sequence,
                                          body: Box::new(body),
                                          line },
                   rest))
}

/// Parses `"(" "let" IDENT ":" expression ")"`.
fn parse_iteration_header(tokens: TokenStream<'_>) -> ParseResult<'_, (String, Expr)> {
    let Parsed { rest, .. } = tokens.expect(&Token::LParen)?;
    let Parsed { rest, .. } = rest.expect(&Token::Let)?;
    let Parsed { value: iterator, rest } = parse_identifier(rest)?;
    let Parsed { rest, .. } = rest.expect(&Token::Colon)?;
    let Parsed { value: sequence, rest } = parse_expression(rest)?;
    let Parsed { rest, .. } = rest.expect(&Token::RParen)?;

    Ok(Parsed::new((iterator, sequence), rest))
}

fn parse_expression_statement(tokens: TokenStream<'_>) -> ParseResult<'_, Statement> {
    parse_expression(tokens).map(|parsed| parsed.map(Statement::Expression))
}

/// Parses a parenthesized condition: `"(" expression ")"`.
fn parse_condition(tokens: TokenStream<'_>) -> ParseResult<'_, Expr> {
    let Parsed { rest, .. } = tokens.expect(&Token::LParen)?;
    let Parsed { value, rest } = parse_expression(rest)?;
    let Parsed { rest, .. } = rest.expect(&Token::RParen)?;

    Ok(Parsed::new(value, rest))
}
