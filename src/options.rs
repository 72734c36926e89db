//! Configuration options for text output.
//!
//! [`WriteOptions`] controls how the text entry points print a written tree:
//! compact on one line, or pretty-printed with a configurable indent.
//!
//! ## Examples
//!
//! ```rust
//! use json_formats::{primitive, seq, to_string_with_options, WriteOptions};
//!
//! let numbers = vec![1u8, 2];
//! let text = to_string_with_options(&numbers, &seq(primitive::number()), WriteOptions::pretty().with_indent(4)).unwrap();
//! assert_eq!(text, "[\n    1,\n    2\n]");
//! ```

/// Configuration options for text output.
///
/// # Examples
///
/// ```rust
/// use json_formats::WriteOptions;
///
/// // Default compact options
/// let options = WriteOptions::new();
/// assert!(!options.pretty);
///
/// // Pretty-printed with 4-space indentation
/// let options = WriteOptions::pretty().with_indent(4);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    pub indent: usize,
    pub pretty: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            indent: 2,
            pretty: false,
        }
    }
}

impl WriteOptions {
    /// Creates default options (compact output, 2-space indent when pretty).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output with newlines and indentation.
    #[must_use]
    pub fn pretty() -> Self {
        WriteOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// Default is 2. Only affects pretty-printed output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub(crate) fn indent_bytes(&self) -> Vec<u8> {
        vec![b' '; self.indent]
    }
}
