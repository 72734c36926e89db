//! Arrays of uniformly formatted elements.

use crate::{Format, Result, ValidationError};
use serde_json::Value;

/// Format for JSON arrays read into a `Vec`.
///
/// Every element is validated; the failures of all bad elements are reported
/// together, each rooted at its index.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeqFormat<F> {
    element: F,
}

/// Returns the sequence format for `element`.
///
/// # Examples
///
/// ```rust
/// use json_formats::{primitive, seq, Format};
/// use serde_json::json;
///
/// let names = seq(primitive::string());
/// assert_eq!(names.read(&json!(["a", "b"])).unwrap(), vec!["a", "b"]);
///
/// let err = names.read(&json!(["a", 1, null])).unwrap_err();
/// assert_eq!(err.len(), 2);
/// assert_eq!(err.violations()[0].path.to_string(), "[1]");
/// ```
#[must_use]
pub fn seq<F>(element: F) -> SeqFormat<F> {
    SeqFormat { element }
}

impl<T, F: Format<T>> Format<Vec<T>> for SeqFormat<F> {
    fn read(&self, json: &Value) -> Result<Vec<T>> {
        let items = match json {
            Value::Array(items) => items,
            other => return Err(ValidationError::type_mismatch("array", other)),
        };

        let mut elements = Vec::with_capacity(items.len());
        let mut errors = ValidationError::default();
        for (i, item) in items.iter().enumerate() {
            match self.element.read(item) {
                Ok(element) => elements.push(element),
                Err(e) => errors.append(e.at_index(i)),
            }
        }

        if errors.is_empty() {
            Ok(elements)
        } else {
            Err(errors)
        }
    }

    fn write(&self, value: &Vec<T>) -> Value {
        Value::Array(value.iter().map(|element| self.element.write(element)).collect())
    }
}
