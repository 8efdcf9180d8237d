use crate::{
    ast::Program,
    error::ParseError,
    interpreter::{lexer::Token, parser::statement::parse_statement},
};

/// An immutable position inside a token sequence.
///
/// Grammar rules receive a stream by value and return the stream positioned
/// after what they consumed. Because the cursor is `Copy`, backtracking is
/// simply reusing an earlier copy.
#[derive(Debug, Clone, Copy)]
pub struct TokenStream<'a> {
    tokens: &'a [(Token, usize)],
    offset: usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream positioned at the first token.
    #[must_use]
    pub const fn new(tokens: &'a [(Token, usize)]) -> Self {
        Self { tokens, offset: 0 }
    }

    /// Returns the token under the cursor, if any.
    #[must_use]
    pub fn peek(&self) -> Option<&'a Token> {
        self.peek_nth(0)
    }

    /// Returns the token `n` positions after the cursor, if any.
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.offset + n).map(|(token, _)| token)
    }

    /// Index of the token under the cursor within the whole sequence.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns `true` once every token has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.offset >= self.tokens.len()
    }

    /// Source line of the token under the cursor.
    ///
    /// At the end of input this is the line of the last token.
    #[must_use]
    pub fn line(&self) -> usize {
        self.tokens
            .get(self.offset)
            .or_else(|| self.tokens.last())
            .map_or(1, |(_, line)| *line)
    }

    /// Moves the cursor `n` tokens forward.
    #[must_use]
    pub const fn advance(self, n: usize) -> Self {
        Self { tokens: self.tokens,
               offset: self.offset + n, }
    }

    /// Skips any optional `;` separators.
    #[must_use]
    pub fn skip_separators(mut self) -> Self {
        while let Some(Token::Semicolon) = self.peek() {
            self = self.advance(1);
        }
        self
    }

    /// Builds the failure describing the token under the cursor.
    #[must_use]
    pub fn failure(&self) -> ParseError {
        match self.tokens.get(self.offset) {
            Some((token, line)) => ParseError::UnexpectedToken { token: token.to_string(),
                                                                 index: self.offset,
                                                                 line:  *line,
                                                                 trace: Vec::new(), },
            None => ParseError::UnexpectedEndOfInput { index: self.offset,
                                                       line:  self.line(),
                                                       trace: Vec::new(), },
        }
    }

    /// Fails at the token under the cursor.
    ///
    /// # Errors
    /// Always returns the failure built by [`TokenStream::failure`].
    pub fn fail<T>(self) -> ParseResult<'a, T> {
        Err(self.failure())
    }

    /// Consumes `expected`, or fails at the token under the cursor.
    ///
    /// # Errors
    /// Returns a `ParseError` when the next token differs from `expected`.
    pub fn expect(self, expected: &Token) -> ParseResult<'a, ()> {
        if self.peek() == Some(expected) {
            Ok(Parsed::new((), self.advance(1)))
        } else {
            self.fail()
        }
    }
}

/// The outcome of a successful rule: a value and the stream after it.
#[derive(Debug)]
pub struct Parsed<'a, T> {
    /// The value the rule produced.
    pub value: T,
    /// The stream positioned after the consumed tokens.
    pub rest:  TokenStream<'a>,
}

impl<'a, T> Parsed<'a, T> {
    /// Pairs a value with the remaining stream.
    pub const fn new(value: T, rest: TokenStream<'a>) -> Self {
        Self { value, rest }
    }

    /// Transforms the value while keeping the position.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<'a, U> {
        Parsed { value: f(self.value),
                 rest:  self.rest, }
    }
}

/// Result type of every grammar rule.
pub type ParseResult<'a, T> = Result<Parsed<'a, T>, ParseError>;

/// A grammar rule that can be stored and passed around.
///
/// Rules are plain functions, so mutually recursive rules refer to each other
/// by name and need no forward declarations.
pub type Rule<'a, T> = fn(TokenStream<'a>) -> ParseResult<'a, T>;

/// Tries each rule in order and returns the first success.
///
/// When every alternative fails, the failure that got furthest into the token
/// sequence is reported. On a tie the later alternative wins.
///
/// # Errors
/// Returns the furthest failure when no rule matches.
pub fn first_of<'a, T>(tokens: TokenStream<'a>, rules: &[Rule<'a, T>]) -> ParseResult<'a, T> {
    let mut furthest: Option<ParseError> = None;

    for rule in rules {
        match rule(tokens) {
            Ok(parsed) => return Ok(parsed),
            Err(e) => {
                if furthest.as_ref().is_none_or(|best| e.index() >= best.index()) {
                    furthest = Some(e);
                }
            },
        }
    }

    Err(furthest.unwrap_or_else(|| tokens.failure()))
}

/// Parses a whole program.
///
/// Grammar: `program := (statement ";"?)*`
///
/// The entire token sequence must be consumed; the first token no statement
/// accepts is reported.
///
/// # Errors
/// Returns the furthest `ParseError` encountered.
///
/// # Example
/// ```
/// use lumen::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let tokens = tokenize("let x := 1; x := x + 1").unwrap();
/// let program = parse_program(&tokens).unwrap();
///
/// assert_eq!(program.statements.len(), 2);
/// assert!(parse_program(&tokenize("let := 1").unwrap()).is_err());
/// ```
pub fn parse_program(tokens: &[(Token, usize)]) -> Result<Program, ParseError> {
    let mut rest = TokenStream::new(tokens).skip_separators();
    let mut statements = Vec::new();

    while !rest.is_empty() {
        let parsed = parse_statement(rest).map_err(|e| e.within("program"))?;
        statements.push(parsed.value);
        rest = parsed.rest.skip_separators();
    }

    Ok(Program { statements })
}
