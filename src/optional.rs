//! Optional values encoded as arrays of zero or one element.
//!
//! `None` is written as `[]` and `Some(x)` as `[x]`. Unlike `null`, the array
//! encoding nests: `Some(None)` and `None` stay distinguishable (`[[]]` versus
//! `[]`), and it composes with element formats that reject `null`.

use crate::{Format, Result, ValidationError};
use serde_json::Value;

/// Format for `Option<T>` using the array encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalArrayFormat<F> {
    element: F,
}

/// Returns the array-encoded optional format for `element`.
///
/// # Examples
///
/// ```rust
/// use json_formats::{optional_array, primitive, Format};
/// use serde_json::json;
///
/// let nickname = optional_array(primitive::string());
/// assert_eq!(nickname.read(&json!([])).unwrap(), None);
/// assert_eq!(nickname.read(&json!(["Al"])).unwrap(), Some("Al".to_string()));
/// assert!(nickname.read(&json!(["Al", "Bo"])).is_err());
/// assert_eq!(nickname.write(&None), json!([]));
/// ```
#[must_use]
pub fn optional_array<F>(element: F) -> OptionalArrayFormat<F> {
    OptionalArrayFormat { element }
}

impl<T, F: Format<T>> Format<Option<T>> for OptionalArrayFormat<F> {
    fn read(&self, json: &Value) -> Result<Option<T>> {
        match json {
            Value::Array(items) => match items.as_slice() {
                [] => Ok(None),
                [item] => self.element.read(item).map(Some).map_err(|e| e.at_index(0)),
                _ => Err(ValidationError::unexpected_shape(format!(
                    "expected an array of at most one element, found {} elements",
                    items.len()
                ))),
            },
            other => Err(ValidationError::type_mismatch("array", other)),
        }
    }

    fn write(&self, value: &Option<T>) -> Value {
        match value {
            None => Value::Array(Vec::new()),
            Some(inner) => Value::Array(vec![self.element.write(inner)]),
        }
    }
}
