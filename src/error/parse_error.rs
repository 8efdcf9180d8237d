#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Token-level failures carry the position of the offending token inside the
/// token sequence together with its source line, so a report can point at the
/// exact occurrence even when the same text appears several times.
pub enum ParseError {
    /// Found a token that no grammar rule could consume.
    UnexpectedToken {
        /// Source text of the token encountered.
        token: String,
        /// Index of the token within the token sequence.
        index: usize,
        /// The source line where the error occurred.
        line:  usize,
        /// Grammar rules that were active when matching broke down, innermost
        /// first.
        trace: Vec<&'static str>,
    },
    /// Reached the end of input while a rule still expected tokens.
    UnexpectedEndOfInput {
        /// Index one past the last token.
        index: usize,
        /// The source line where the error occurred.
        line:  usize,
        /// Grammar rules that were active, innermost first.
        trace: Vec<&'static str>,
    },
    /// The lexer met a character that starts no token.
    InvalidCharacter {
        /// The unrecognized source text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A lambda declared the same parameter name twice.
    DuplicateParameter {
        /// The repeated parameter.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The operator resolver ran out of operands or operators.
    MalformedExpression {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl ParseError {
    /// Position in the token sequence the failure is anchored at.
    ///
    /// Alternation uses this to keep the failure that progressed furthest.
    /// Failures that are not anchored at a token are definite and report
    /// `usize::MAX`, so no other alternative can shadow them.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::UnexpectedToken { index, .. } | Self::UnexpectedEndOfInput { index, .. } => {
                *index
            },
            Self::InvalidCharacter { .. }
            | Self::DuplicateParameter { .. }
            | Self::MalformedExpression { .. } => usize::MAX,
        }
    }

    /// Records that the failure propagated out of the named grammar rule.
    #[must_use]
    pub fn within(mut self, rule: &'static str) -> Self {
        if let Self::UnexpectedToken { trace, .. } | Self::UnexpectedEndOfInput { trace, .. } =
            &mut self
            && trace.last() != Some(&rule)
        {
            trace.push(rule);
        }
        self
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token,
                                    index,
                                    line,
                                    trace, } => {
                write!(f,
                       "Error on line {line}: Unexpected token '{token}' (token #{index}).")?;
                write_trace(f, trace)
            },
            Self::UnexpectedEndOfInput { line, trace, .. } => {
                write!(f, "Error on line {line}: Unexpected end of input.")?;
                write_trace(f, trace)
            },
            Self::InvalidCharacter { text, line } => {
                write!(f, "Error on line {line}: Invalid character '{text}'.")
            },
            Self::DuplicateParameter { name, line } => write!(f,
                                                              "Error on line {line}: Parameter '{name}' is declared more than once."),
            Self::MalformedExpression { line } => {
                write!(f, "Error on line {line}: Malformed operator expression.")
            },
        }
    }
}

fn write_trace(f: &mut std::fmt::Formatter<'_>, trace: &[&'static str]) -> std::fmt::Result {
    if trace.is_empty() {
        return Ok(());
    }
    write!(f, " While parsing: {}.", trace.join(" <- "))
}

impl std::error::Error for ParseError {}
