#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// Operand variants were incompatible with an operator or coercion target.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Division or modulo by zero, or a numeric conversion failure.
    ArithmeticError {
        /// Details about the arithmetic failure.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A compound assignment, increment or decrement was applied to a name
    /// with no prior value.
    UnboundError {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A lambda parameter name collides with an existing local binding.
    ConflictError {
        /// The colliding parameter name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A lambda was invoked with the wrong number of arguments.
    ArityError {
        /// The number of parameters the lambda declares.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The cancellation token was signalled.
    CancelledError {
        /// The source line where cancellation was observed.
        line: usize,
    },
    /// A host capability failed. Host failures propagate unchanged.
    HostError {
        /// Details supplied by the host.
        details: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },
            Self::ArithmeticError { details, line } => {
                write!(f, "Error on line {line}: Arithmetic error: {details}.")
            },
            Self::UnboundError { name, line } => write!(f,
                                                        "Error on line {line}: Variable '{name}' has no value to update."),
            Self::ConflictError { name, line } => write!(f,
                                                         "Error on line {line}: Lambda parameter '{name}' collides with an existing variable."),
            Self::ArityError { expected,
                               found,
                               line, } => write!(f,
                                                 "Error on line {line}: Lambda expects {expected} argument(s), but {found} were supplied."),
            Self::CancelledError { line } => {
                write!(f, "Error on line {line}: Evaluation was cancelled.")
            },
            Self::HostError { details } => write!(f, "Host error: {details}."),
        }
    }
}

impl std::error::Error for RuntimeError {}
