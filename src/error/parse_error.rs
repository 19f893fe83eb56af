#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A literal could not be converted into a runtime value.
    InvalidLiteral {
        /// Details about the malformed literal.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A lambda signature declares the same parameter name twice.
    DuplicateParameter {
        /// The repeated parameter name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A parameter declaration appeared after ordinary statements.
    MisplacedParameter {
        /// The name of the declared parameter.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },
            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },
            Self::InvalidLiteral { details, line } => {
                write!(f, "Error on line {line}: Invalid literal: {details}.")
            },
            Self::DuplicateParameter { name, line } => write!(f,
                                                              "Error on line {line}: Duplicate lambda parameter '{name}'."),
            Self::MisplacedParameter { name, line } => write!(f,
                                                              "Error on line {line}: Parameter '{name}' must be declared before any statement."),
        }
    }
}

impl std::error::Error for ParseError {}
