use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.14` or `.5`.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+", parse_number)]
    Number(f64),
    /// String literal tokens between single quotes, such as `'hello'`.
    #[regex(r"'[^']*'", parse_string)]
    Str(String),
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `let`
    #[token("let")]
    Let,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `loop`
    #[token("loop")]
    Loop,
    /// `return`
    #[token("return")]
    Return,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// Identifier tokens; variable or function names such as `x` or `fac`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `:=`
    #[token(":=")]
    Assign,
    /// `:`
    #[token(":")]
    Colon,
    /// `->`
    #[token("->")]
    Arrow,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `=`
    #[token("=")]
    Equals,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`, an optional statement separator.
    #[token(";")]
    Semicolon,
    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Number(n) => return write!(f, "{n}"),
            Self::Str(s) => return write!(f, "'{s}'"),
            Self::Identifier(name) => return write!(f, "{name}"),
            Self::True => "true",
            Self::False => "false",
            Self::Let => "let",
            Self::If => "if",
            Self::Else => "else",
            Self::For => "for",
            Self::Loop => "loop",
            Self::Return => "return",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Comment => "//",
            Self::Assign => ":=",
            Self::Colon => ":",
            Self::Arrow => "->",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Caret => "^",
            Self::Equals => "=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::NewLine => "\\n",
            Self::Ignored => " ",
        };
        write!(f, "{text}")
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Splits source text into tokens paired with their source line.
///
/// The position of a token in the returned vector is its identity: parse
/// failures report that index so the exact occurrence can be located.
///
/// # Errors
/// Returns [`ParseError::InvalidCharacter`] for text that starts no token,
/// including an unterminated string literal.
///
/// # Example
/// ```
/// use lumen::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("let x := 2\nx").unwrap();
///
/// assert_eq!(tokens[0], (Token::Let, 1));
/// assert_eq!(tokens[3], (Token::Number(2.0), 1));
/// assert_eq!(tokens[4], (Token::Identifier("x".to_string()), 2));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            return Err(ParseError::InvalidCharacter { text: lexer.slice().to_string(),
                                                      line: lexer.extras.line, });
        }
    }

    Ok(tokens)
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the token slice is not a valid number.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Strips the surrounding quotes from a string literal.
///
/// Line breaks inside the literal still advance the line counter.
fn parse_string(lex: &mut logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let newlines = slice.chars().filter(|&c| c == '\n').count();
    let text = slice.get(1..slice.len() - 1).map(ToString::to_string);
    lex.extras.line += newlines;
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(token, _)| token).collect()
    }

    #[test]
    fn keywords_need_a_word_boundary() {
        assert_eq!(kinds("let letter"),
                   vec![Token::Let, Token::Identifier("letter".to_string())]);
        assert_eq!(kinds("notice not"),
                   vec![Token::Identifier("notice".to_string()), Token::Not]);
    }

    #[test]
    fn longest_operator_wins() {
        assert_eq!(kinds(":= : -> - <= <"),
                   vec![Token::Assign,
                        Token::Colon,
                        Token::Arrow,
                        Token::Minus,
                        Token::LessEqual,
                        Token::Less]);
    }

    #[test]
    fn numbers_and_strings() {
        assert_eq!(kinds("42 3.25 .5 'it is'"),
                   vec![Token::Number(42.0),
                        Token::Number(3.25),
                        Token::Number(0.5),
                        Token::Str("it is".to_string())]);
    }

    #[test]
    fn comments_are_skipped_and_lines_counted() {
        let tokens = tokenize("a // first\n\n// whole line\nb").unwrap();

        assert_eq!(tokens,
                   vec![(Token::Identifier("a".to_string()), 1),
                        (Token::Identifier("b".to_string()), 4)]);
    }

    #[test]
    fn unknown_character_is_reported_with_its_line() {
        assert_eq!(tokenize("a\n#"),
                   Err(ParseError::InvalidCharacter { text: "#".to_string(),
                                                      line: 2, }));
    }
}
