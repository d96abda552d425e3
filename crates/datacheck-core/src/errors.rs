use thiserror::Error;

/// The source could not be turned into a [`Table`](crate::Table).
#[derive(Error, Debug)]
pub enum ParseError {
    /// No header row, or a header made only of empty names
    #[error("Header row is empty")]
    EmptyHeader,

    /// Column names must be unique (case-sensitive, whitespace included)
    #[error("Duplicate column '{0}' in header")]
    DuplicateColumn(String),

    /// A data row whose field count differs from the header, or broken quoting
    #[error("Malformed row: {0}")]
    Malformed(String),

    /// The bytes are not valid UTF-8
    #[error("Source is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),
}

/// Run-level failure: no table exists, so no rule can execute.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The caller cancelled the load or its timeout elapsed
    #[error("Load cancelled: {0}")]
    Cancelled(String),
}

impl From<arrow::error::ArrowError> for LoadError {
    fn from(err: arrow::error::ArrowError) -> Self {
        match err {
            arrow::error::ArrowError::IoError(msg, io) => {
                LoadError::IoError(std::io::Error::new(io.kind(), msg))
            }
            other => LoadError::Parse(ParseError::Malformed(other.to_string())),
        }
    }
}

/// A rule invocation that cannot be turned into an executable expectation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpectationError {
    #[error("Unknown rule '{0}'")]
    UnknownRule(String),

    /// Wrong field type, missing field or unsupported field
    #[error("Malformed expectation for '{rule}': {message}")]
    Malformed { rule: String, message: String },

    /// Well-typed but meaningless parameters (e.g. `min > max`)
    #[error("Invalid expectation for '{rule}': {message}")]
    Invalid { rule: String, message: String },
}

/// A rule that could not be evaluated against the given tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// Column not found in the table header
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    #[error("Rule requires a reference table but none was provided")]
    MissingReference,

    #[error("Invalid regex pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}
