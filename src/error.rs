//! Error type for the text entry points.
//!
//! Reading a document from text can fail in three ways, each with its own
//! variant:
//!
//! - **Syntax Errors**: the text is not valid JSON, with line/column information
//! - **Invalid Documents**: the JSON is well formed but the format rejected it;
//!   the [`ValidationError`] lists every violation
//! - **I/O Errors**: the reader or writer handed in by the caller failed
//!
//! ## Examples
//!
//! ```rust
//! use json_formats::{from_str, primitive, seq, Error};
//!
//! let result: Result<Vec<bool>, Error> = from_str("[true, 1]", &seq(primitive::boolean()));
//! match result {
//!     Err(Error::Invalid(report)) => assert_eq!(report.len(), 1),
//!     other => panic!("unexpected {:?}", other),
//! }
//!
//! let result: Result<Vec<bool>, Error> = from_str("[true,", &seq(primitive::boolean()));
//! assert!(matches!(result, Err(Error::Syntax { .. })));
//! ```

use crate::ValidationError;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors of the text entry points.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The text is not well-formed JSON
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// The document is well formed but does not match the format
    #[error("Invalid document:\n{0}")]
    Invalid(#[from] ValidationError),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_formats::Error;
    ///
    /// let err = Error::syntax(10, 5, "trailing comma");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for failed reads or writes.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// The validation report, if the document was rejected by its format.
    #[must_use]
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Invalid(report) => Some(report),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Io => Error::io(&err.to_string()),
            Category::Syntax | Category::Eof | Category::Data => Error::Syntax {
                line: err.line(),
                col: err.column(),
                msg: err.to_string(),
            },
        }
    }
}
