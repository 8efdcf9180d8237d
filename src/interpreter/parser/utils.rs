use crate::interpreter::{
    lexer::Token,
    parser::core::{Parsed, ParseResult, Rule, TokenStream},
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by list literals, argument lists and lambda
/// parameter lists. It repeatedly calls `parse_item` to parse one element,
/// expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Stream positioned at the first item or closing token.
/// - `parse_item`: Rule used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// The parsed items, with the stream positioned after `closing`.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - a token other than `,` or `closing` follows an item,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, T>(tokens: TokenStream<'a>,
                                                                   parse_item: Rule<'a, T>,
                                                                   closing: &Token)
                                                                   -> ParseResult<'a, Vec<T>> {
    let mut items = Vec::new();
    if tokens.peek() == Some(closing) {
        return Ok(Parsed::new(items, tokens.advance(1)));
    }

    let mut rest = tokens;
    loop {
        let Parsed { value, rest: after } = parse_item(rest)?;
        items.push(value);
        match after.peek() {
            Some(Token::Comma) => rest = after.advance(1),
            Some(tok) if tok == closing => return Ok(Parsed::new(items, after.advance(1))),
            _ => return after.fail(),
        }
    }
}

/// Parses a plain identifier and returns its name.
///
/// The next token must be `Token::Identifier`. Keywords are separate tokens,
/// so they never reach this rule.
///
/// # Errors
/// Fails at the token under the cursor if it is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier(tokens: TokenStream<'_>)
                                                       -> ParseResult<'_, String> {
    match tokens.peek() {
        Some(Token::Identifier(name)) => Ok(Parsed::new(name.clone(), tokens.advance(1))),
        _ => tokens.fail(),
    }
}
