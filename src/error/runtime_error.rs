#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during evaluation.
///
/// Every evaluation failure is fatal: the running program stops at the first
/// one. Offending values are stored in their display form.
pub enum RuntimeError {
    /// Tried to read or re-assign a name that is bound in no frame.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to initialize a name already bound in the innermost frame.
    AlreadyDefined {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Invoked a name whose value is not a function.
    NotCallable {
        /// The invoked name.
        name:  String,
        /// Display form of the value found under that name.
        value: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A function received the wrong number of arguments.
    ArgumentCountMismatch {
        /// The function name.
        name:     String,
        /// Human readable description of the accepted arity.
        expected: String,
        /// Number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An operator was applied to operands it does not support.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A boolean value was expected, but not found.
    ExpectedBoolean {
        /// Display form of the value found instead.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A number was expected, but not found.
    ExpectedNumber {
        /// Display form of the value found instead.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A list was expected, but not found.
    ExpectedList {
        /// Display form of the value found instead.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A `for` loop was given something that cannot be enumerated.
    NotIterable {
        /// Display form of the value found instead.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An index was past the end of a sequence.
    IndexOutOfBounds {
        /// Length of the sequence.
        len:   usize,
        /// The requested index.
        found: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An index was negative, fractional, or not finite.
    InvalidIndex {
        /// The rejected number.
        found: f64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A native function received an argument it cannot work with.
    InvalidArgument {
        /// Details describing the problem.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A construct that must produce a value produced none.
    MissingValue {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Writing program output failed.
    Output {
        /// Description of the underlying I/O failure.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Error on line {line}: Unknown variable '{name}'.")
            },
            Self::AlreadyDefined { name, line } => write!(f,
                                                          "Error on line {line}: '{name}' is already defined in this scope."),
            Self::NotCallable { name, value, line } => write!(f,
                                                              "Error on line {line}: '{name}' is not a function (found {value})."),
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found,
                                          line, } => write!(f,
                                                            "Error on line {line}: '{name}' expects {expected} argument(s), but {found} were given."),
            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },
            Self::ExpectedBoolean { found, line } => {
                write!(f, "Error on line {line}: Expected boolean, found {found}.")
            },
            Self::ExpectedNumber { found, line } => {
                write!(f, "Error on line {line}: Expected number, found {found}.")
            },
            Self::ExpectedList { found, line } => {
                write!(f, "Error on line {line}: Expected list, found {found}.")
            },
            Self::NotIterable { found, line } => {
                write!(f, "Error on line {line}: Cannot iterate over {found}.")
            },
            Self::IndexOutOfBounds { len, found, line } => write!(f,
                                                                  "Error on line {line}: Index out of bounds. Length is {len}, but found {found} instead."),
            Self::InvalidIndex { found, line } => write!(f,
                                                         "Error on line {line}: {found} is not a valid index."),
            Self::InvalidArgument { details, line } => {
                write!(f, "Error on line {line}: Invalid argument: {details}.")
            },
            Self::MissingValue { line } => write!(f, "Error on line {line}: Value missing."),
            Self::Output { details, line } => {
                write!(f, "Error on line {line}: Failed to write output: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
