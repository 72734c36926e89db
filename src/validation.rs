//! Validation failures produced by readers.
//!
//! Every reader in this crate returns [`Result<T>`], whose error side is a
//! [`ValidationError`]: an ordered list of [`Violation`]s, each pairing a
//! [`Path`] with an [`ErrorKind`]. Readers never stop at the first problem
//! when the problems are independent, so one report can point at every bad
//! node of a document.
//!
//! ## Error Kinds
//!
//! - **TypeMismatch**: the node has the wrong JSON type
//! - **UndefinedValue**: a string does not name any member of an enumeration
//! - **MissingField**: a required object field is absent
//! - **UnexpectedShape**: the node has the right type but the wrong structure
//! - **Custom**: a failure raised by user code (filters, conversions)
//!
//! ## Examples
//!
//! ```rust
//! use json_formats::{ErrorKind, ValidationError};
//!
//! let first = ValidationError::missing_field().at_key("name");
//! let second = ValidationError::custom("must be positive").at_key("age");
//! let report = first.concat(second);
//!
//! assert_eq!(report.len(), 2);
//! assert_eq!(report.to_string(), "/name: missing field\n/age: must be positive");
//! assert_eq!(report.violations()[0].kind, ErrorKind::MissingField);
//! ```

use crate::path::{Path, PathNode};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The outcome of every read.
pub type Result<T, E = ValidationError> = std::result::Result<T, E>;

/// What went wrong at a single location.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorKind {
    /// The node has a different JSON type than the format expects.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A string does not match any member of an enumeration.
    #[error("undefined value {value:?}")]
    UndefinedValue { value: String },

    /// A required object field is absent.
    #[error("missing field")]
    MissingField,

    /// The node has the expected type but not the expected structure.
    #[error("unexpected shape: {message}")]
    UnexpectedShape { message: String },

    /// Failure raised by a user-supplied predicate or conversion.
    #[error("{message}")]
    Custom { message: String },
}

/// A single failure and where it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: Path,
    #[serde(flatten)]
    pub kind: ErrorKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// An ordered collection of violations.
///
/// Readers only ever fail with at least one violation. Concatenation keeps the
/// violations of the left operand in front of those of the right one and never
/// reorders or deduplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Creates an error with a single violation located at the root.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self::at(Path::root(), kind)
    }

    /// Creates an error with a single violation at `path`.
    #[must_use]
    pub fn at(path: Path, kind: ErrorKind) -> Self {
        ValidationError {
            violations: vec![Violation { path, kind }],
        }
    }

    /// Creates a type mismatch for `found`, which was expected to be `expected`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_formats::ValidationError;
    /// use serde_json::json;
    ///
    /// let err = ValidationError::type_mismatch("string", &json!(42));
    /// assert_eq!(err.to_string(), "/: expected string, found number");
    /// ```
    #[must_use]
    pub fn type_mismatch(expected: &'static str, found: &Value) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            expected,
            found: json_type(found),
        })
    }

    /// Creates an error for a string that names no enumeration member.
    #[must_use]
    pub fn undefined_value(value: &str) -> Self {
        Self::new(ErrorKind::UndefinedValue {
            value: value.to_string(),
        })
    }

    /// Creates an error for an absent required field.
    ///
    /// The violation sits at the root; callers re-root it with
    /// [`ValidationError::at_key`].
    #[must_use]
    pub fn missing_field() -> Self {
        Self::new(ErrorKind::MissingField)
    }

    /// Creates an error for a node with an unexpected structure.
    #[must_use]
    pub fn unexpected_shape<T: fmt::Display>(msg: T) -> Self {
        Self::new(ErrorKind::UnexpectedShape {
            message: msg.to_string(),
        })
    }

    /// Creates a custom error with a display message.
    #[must_use]
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::new(ErrorKind::Custom {
            message: msg.to_string(),
        })
    }

    /// The violations, in report order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Number of violations in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns `true` if the report holds no violations.
    ///
    /// Only [`crate::merge_errors`] can produce an empty report, when none of
    /// its inputs failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Appends the violations of `other` after those of `self`.
    pub fn append(&mut self, other: ValidationError) {
        self.violations.extend(other.violations);
    }

    /// Returns the concatenation of `self` and `other`.
    #[must_use]
    pub fn concat(mut self, other: ValidationError) -> Self {
        self.append(other);
        self
    }

    /// Re-roots every violation under `node`.
    #[must_use]
    pub fn prefixed(self, node: PathNode) -> Self {
        ValidationError {
            violations: self
                .violations
                .into_iter()
                .map(|v| Violation {
                    path: v.path.prepend(node.clone()),
                    kind: v.kind,
                })
                .collect(),
        }
    }

    /// Re-roots every violation under the object field `key`.
    #[must_use]
    pub fn at_key(self, key: &str) -> Self {
        self.prefixed(PathNode::Key(key.to_string()))
    }

    /// Re-roots every violation under the array element `index`.
    #[must_use]
    pub fn at_index(self, index: usize) -> Self {
        self.prefixed(PathNode::Index(index))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl IntoIterator for ValidationError {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl FromIterator<Violation> for ValidationError {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        ValidationError {
            violations: iter.into_iter().collect(),
        }
    }
}

/// Name of the JSON type of `value`, as used in type mismatch messages.
#[must_use]
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_mismatch_names_both_types() {
        let err = ValidationError::type_mismatch("array", &json!({"a": 1}));
        assert_eq!(
            err.violations()[0].kind,
            ErrorKind::TypeMismatch {
                expected: "array",
                found: "object"
            }
        );
    }

    #[test]
    fn test_concat_preserves_order() {
        let a = ValidationError::custom("a");
        let b = ValidationError::custom("b");
        let c = ValidationError::custom("c");

        let left = a.clone().concat(b.clone()).concat(c.clone());
        let right = a.concat(b.concat(c));
        assert_eq!(left, right);

        let messages: Vec<String> = left.into_iter().map(|v| v.kind.to_string()).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_prefixing_reroots_every_violation() {
        let err = ValidationError::missing_field()
            .at_key("name")
            .concat(ValidationError::custom("bad").at_index(1))
            .at_key("users");

        let paths: Vec<String> = err.violations().iter().map(|v| v.path.to_string()).collect();
        assert_eq!(paths, vec!["/users/name", "/users[1]"]);
    }

    #[test]
    fn test_serialize_report() {
        let err = ValidationError::undefined_value("purple").at_index(0);
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!([{ "path": "[0]", "kind": "undefined_value", "value": "purple" }])
        );
    }

    #[test]
    fn test_default_is_empty() {
        assert!(ValidationError::default().is_empty());
        assert_eq!(ValidationError::default().to_string(), "");
    }
}
