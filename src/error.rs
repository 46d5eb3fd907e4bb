//! Error types for the schemelet interpreter

use thiserror::Error;

/// Interpreter errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Parse errors
    /// Malformed source or special-form shape
    ///
    /// **Triggered by:** unbalanced parentheses, wrong special-form arity,
    /// non-symbol parameters, evaluating `()`
    /// **Example:** `(if #t 1)` (missing alternative)
    #[error("Syntax error: {message}")]
    SyntaxError {
        /// Error description
        message: String,
    },

    /// Parser invoked with no tokens left
    #[error("Syntax error: unexpected EOF while parsing")]
    UnexpectedEof,

    // Runtime errors
    /// Reference to a symbol bound nowhere in the environment chain
    ///
    /// **Triggered by:** using a name before `define` binds it
    /// **Example:** `(+ y 1)` when `y` was never defined
    #[error("Variable '{name}' not found")]
    UndefinedVariable {
        /// Symbol name
        name: String,
    },

    /// A builtin received a value of the wrong type
    ///
    /// **Example:** `(+ 1 #t)`
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: String,
        /// Actual type
        got: String,
    },

    /// Attempt to call a value that is not a procedure
    ///
    /// **Example:** `(1 2 3)`
    #[error("Type error: procedure is not callable: {expr}")]
    NotCallable {
        /// Source text of the head expression
        expr: String,
    },

    /// A procedure was called with an unsupported number of arguments
    ///
    /// **Example:** `((lambda (a b) a) 1)`
    #[error("Arity error: {procedure} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        /// Procedure name (`lambda` for closures)
        procedure: String,
        /// Accepted argument count, e.g. `2` or `1 or 2`
        expected: String,
        /// Number of arguments actually passed
        got: usize,
    },

    // Resource errors
    /// Nested evaluation exceeded the configured depth limit
    #[error("Recursion limit exceeded (max depth: {limit})")]
    RecursionLimitExceeded {
        /// Configured maximum depth
        limit: usize,
    },
}

/// Logical error category, independent of the message text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed source or special form
    Syntax,
    /// Unbound symbol
    Name,
    /// Wrong value type or non-callable head
    Type,
    /// Wrong argument count
    Arity,
    /// Evaluation limits
    Resource,
}

impl Error {
    /// Create a syntax error with a message
    pub fn syntax(msg: impl Into<String>) -> Self {
        Error::SyntaxError {
            message: msg.into(),
        }
    }

    /// Create a type error for a builtin that requires `expected`
    pub fn type_error(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Error::TypeError {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SyntaxError { .. } | Error::UnexpectedEof => ErrorKind::Syntax,
            Error::UndefinedVariable { .. } => ErrorKind::Name,
            Error::TypeError { .. } | Error::NotCallable { .. } => ErrorKind::Type,
            Error::ArityMismatch { .. } => ErrorKind::Arity,
            Error::RecursionLimitExceeded { .. } => ErrorKind::Resource,
        }
    }
}

/// Result type for schemelet operations
pub type Result<T> = std::result::Result<T, Error>;
