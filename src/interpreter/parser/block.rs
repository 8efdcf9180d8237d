use crate::{
    ast::{Block, Statement},
    interpreter::{
        lexer::Token,
        parser::{
            core::{Parsed, ParseResult, TokenStream},
            statement::parse_statement,
        },
    },
};

/// Parses a block enclosed in braces.
///
/// Grammar: `block := "{" (statement ";"?)* "}"`
///
/// If the last statement is a bare expression it becomes the block's
/// `result`; otherwise the block produces no value.
///
/// # Errors
/// Returns a `ParseError` if a statement fails or the closing brace is
/// missing.
pub fn parse_block(tokens: TokenStream<'_>) -> ParseResult<'_, Block> {
    let Parsed { rest, .. } = tokens.expect(&Token::LBrace)?;
    let mut rest = rest.skip_separators();
    let mut statements = Vec::new();

    loop {
        match rest.peek() {
            Some(Token::RBrace) => break,
            None => return Err(rest.failure().within("block")),
            Some(_) => {},
        }
        let parsed = parse_statement(rest).map_err(|e| e.within("block"))?;
        statements.push(parsed.value);
        rest = parsed.rest.skip_separators();
    }

    let result = match statements.pop() {
        Some(Statement::Expression(expr)) => Some(Box::new(expr)),
        Some(other) => {
            statements.push(other);
            None
        },
        None => None,
    };

    Ok(Parsed::new(Block { statements, result }, rest.advance(1)))
}
