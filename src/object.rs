//! Helpers for reading record-shaped objects.
//!
//! Record formats are usually written by hand with [`crate::format_fn`]: read
//! each field with [`read_field`], combine the per-field results with
//! [`crate::merge_results!`] so that every bad field is reported, and build the
//! output object field by field.

use crate::{Format, Result, ValidationError};
use serde_json::{Map, Value};

/// Returns the fields of `json`, or a type mismatch if it is not an object.
pub fn as_object(json: &Value) -> Result<&Map<String, Value>> {
    match json {
        Value::Object(obj) => Ok(obj),
        other => Err(ValidationError::type_mismatch("object", other)),
    }
}

/// Reads the required field `name` of `obj` with `format`.
///
/// An absent field fails with `MissingField`; failures of `format` are
/// re-rooted under `name`.
///
/// # Examples
///
/// ```rust
/// use json_formats::{object, primitive};
/// use serde_json::json;
///
/// let doc = json!({"name": "Alice"});
/// let obj = object::as_object(&doc).unwrap();
///
/// let name: String = object::read_field(obj, "name", &primitive::string()).unwrap();
/// assert_eq!(name, "Alice");
///
/// let err = object::read_field::<bool, _>(obj, "admin", &primitive::boolean()).unwrap_err();
/// assert_eq!(err.to_string(), "/admin: missing field");
/// ```
pub fn read_field<T, F>(obj: &Map<String, Value>, name: &str, format: &F) -> Result<T>
where
    F: Format<T> + ?Sized,
{
    match obj.get(name) {
        Some(json) => format.read(json).map_err(|e| e.at_key(name)),
        None => Err(ValidationError::missing_field().at_key(name)),
    }
}

/// Reads the field `name` of `obj`, treating an absent or `null` field as `None`.
pub fn read_optional_field<T, F>(
    obj: &Map<String, Value>,
    name: &str,
    format: &F,
) -> Result<Option<T>>
where
    F: Format<T> + ?Sized,
{
    match obj.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(json) => format.read(json).map(Some).map_err(|e| e.at_key(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{primitive, ErrorKind};
    use serde_json::json;

    #[test]
    fn test_as_object_rejects_arrays() {
        let err = as_object(&json!([])).unwrap_err();
        assert_eq!(
            err.violations()[0].kind,
            ErrorKind::TypeMismatch {
                expected: "object",
                found: "array"
            }
        );
    }

    #[test]
    fn test_field_failure_is_rerooted() {
        let doc = json!({"age": "ten"});
        let obj = as_object(&doc).unwrap();
        let err = read_field::<u32, _>(obj, "age", &primitive::number()).unwrap_err();
        assert_eq!(err.violations()[0].path.to_string(), "/age");
    }

    #[test]
    fn test_optional_field() {
        let doc = json!({"nick": null, "email": "a@b.c", "bad": 1});
        let obj = as_object(&doc).unwrap();
        let string = primitive::string();

        assert_eq!(read_optional_field(obj, "nick", &string).unwrap(), None);
        assert_eq!(read_optional_field(obj, "missing", &string).unwrap(), None);
        assert_eq!(
            read_optional_field(obj, "email", &string).unwrap(),
            Some("a@b.c".to_string())
        );
        assert!(read_optional_field(obj, "bad", &string).is_err());
    }
}
