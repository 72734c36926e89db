//! Elementary formats for scalar values.
//!
//! These are the building blocks every composite format bottoms out in:
//!
//! | Constructor | Rust types | JSON |
//! |-------------|------------|------|
//! | [`string()`] | `String` | string |
//! | [`boolean()`] | `bool` | boolean |
//! | [`number()`] | `i8`..`i64`, `u8`..`u64`, `isize`, `usize`, `f32`, `f64` | number |
//! | [`value()`] | `serde_json::Value` | anything |
//! | [`datetime()`] | `chrono::DateTime<Utc>` | RFC 3339 string |
//!
//! Integer reads reject numbers with a fractional part and numbers outside the
//! target type's range; `f32` reads reject magnitudes above `f32::MAX`.
//! Non-finite floats have no JSON representation and are
//! written as `null`.

use crate::{Format, Result, ValidationError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Format for JSON strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringFormat;

/// Returns the string format.
#[must_use]
pub fn string() -> StringFormat {
    StringFormat
}

impl Format<String> for StringFormat {
    fn read(&self, json: &Value) -> Result<String> {
        match json {
            Value::String(s) => Ok(s.clone()),
            other => Err(ValidationError::type_mismatch("string", other)),
        }
    }

    fn write(&self, value: &String) -> Value {
        Value::String(value.clone())
    }
}

/// Format for JSON booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolFormat;

/// Returns the boolean format.
#[must_use]
pub fn boolean() -> BoolFormat {
    BoolFormat
}

impl Format<bool> for BoolFormat {
    fn read(&self, json: &Value) -> Result<bool> {
        match json {
            Value::Bool(b) => Ok(*b),
            other => Err(ValidationError::type_mismatch("boolean", other)),
        }
    }

    fn write(&self, value: &bool) -> Value {
        Value::Bool(*value)
    }
}

/// Format for JSON numbers, implemented for every primitive numeric type.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberFormat;

/// Returns the number format. The Rust type is picked by inference.
///
/// # Examples
///
/// ```rust
/// use json_formats::{primitive, Format};
/// use serde_json::json;
///
/// let byte: u8 = primitive::number().read(&json!(255)).unwrap();
/// assert_eq!(byte, 255);
///
/// let too_big: json_formats::Result<u8> = primitive::number().read(&json!(256));
/// assert!(too_big.is_err());
/// ```
#[must_use]
pub fn number() -> NumberFormat {
    NumberFormat
}

fn read_integer(json: &Value, target: &'static str) -> Result<i128> {
    match json {
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => Ok(i128::from(i)),
            (None, Some(u), _) => Ok(i128::from(u)),
            (None, None, Some(f)) if f.fract() == 0.0 => Err(ValidationError::custom(format!(
                "{} is out of range for {}",
                n, target
            ))),
            _ => Err(ValidationError::custom(format!("{} is not an integer", n))),
        },
        other => Err(ValidationError::type_mismatch(target, other)),
    }
}

macro_rules! integer_formats {
    ($($ty:ty),*) => {
        $(
            impl Format<$ty> for NumberFormat {
                fn read(&self, json: &Value) -> Result<$ty> {
                    let n = read_integer(json, stringify!($ty))?;
                    <$ty>::try_from(n).map_err(|_| {
                        ValidationError::custom(format!(
                            "{} is out of range for {}",
                            n,
                            stringify!($ty)
                        ))
                    })
                }

                fn write(&self, value: &$ty) -> Value {
                    Value::from(*value)
                }
            }
        )*
    };
}

integer_formats!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Format<f64> for NumberFormat {
    fn read(&self, json: &Value) -> Result<f64> {
        json.as_f64()
            .ok_or_else(|| ValidationError::type_mismatch("number", json))
    }

    fn write(&self, value: &f64) -> Value {
        Value::from(*value)
    }
}

impl Format<f32> for NumberFormat {
    fn read(&self, json: &Value) -> Result<f32> {
        let n = json
            .as_f64()
            .ok_or_else(|| ValidationError::type_mismatch("number", json))?;
        if n.abs() > f64::from(f32::MAX) {
            return Err(ValidationError::custom(format!(
                "{} is out of range for f32",
                n
            )));
        }
        Ok(n as f32)
    }

    fn write(&self, value: &f32) -> Value {
        Value::from(*value)
    }
}

/// Identity format: reads and writes the tree unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueFormat;

/// Returns the identity format.
#[must_use]
pub fn value() -> ValueFormat {
    ValueFormat
}

impl Format<Value> for ValueFormat {
    fn read(&self, json: &Value) -> Result<Value> {
        Ok(json.clone())
    }

    fn write(&self, value: &Value) -> Value {
        value.clone()
    }
}

/// Format for UTC timestamps encoded as RFC 3339 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeFormat;

/// Returns the timestamp format.
///
/// Any offset is accepted on read and normalized to UTC; writes use the `Z`
/// suffix and only print sub-second digits when present.
///
/// # Examples
///
/// ```rust
/// use json_formats::{primitive, Format};
/// use serde_json::json;
///
/// let ts = primitive::datetime().read(&json!("2024-01-15T12:30:00+02:00")).unwrap();
/// assert_eq!(primitive::datetime().write(&ts), json!("2024-01-15T10:30:00Z"));
/// ```
#[must_use]
pub fn datetime() -> DateTimeFormat {
    DateTimeFormat
}

impl Format<DateTime<Utc>> for DateTimeFormat {
    fn read(&self, json: &Value) -> Result<DateTime<Utc>> {
        let text = match json {
            Value::String(s) => s,
            other => return Err(ValidationError::type_mismatch("string", other)),
        };
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ValidationError::custom(format!("invalid RFC 3339 timestamp: {}", e)))
    }

    fn write(&self, value: &DateTime<Utc>) -> Value {
        Value::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_string_and_bool() {
        assert_eq!(string().read(&json!("hi")).unwrap(), "hi");
        assert!(boolean().read(&json!(true)).unwrap());
        assert_eq!(string().write(&"x".to_string()), json!("x"));
        assert_eq!(boolean().write(&false), json!(false));
    }

    #[test]
    fn test_wrong_type_reports_found_type() {
        let err = string().read(&json!([1])).unwrap_err();
        assert_eq!(
            err.violations()[0].kind,
            ErrorKind::TypeMismatch {
                expected: "string",
                found: "array"
            }
        );
    }

    #[test]
    fn test_integers() {
        let n: i32 = number().read(&json!(-42)).unwrap();
        assert_eq!(n, -42);
        let big: u64 = number().read(&json!(u64::MAX)).unwrap();
        assert_eq!(big, u64::MAX);
        assert_eq!(number().write(&7u16), json!(7));
    }

    #[test]
    fn test_integer_rejects_fraction_and_overflow() {
        let fraction: Result<i64> = number().read(&json!(1.5));
        assert_eq!(
            fraction.unwrap_err().violations()[0].kind,
            ErrorKind::Custom {
                message: "1.5 is not an integer".to_string()
            }
        );

        let huge: Result<u64> = number().read(&json!(1e20));
        assert!(matches!(
            huge.unwrap_err().violations()[0].kind,
            ErrorKind::Custom { ref message } if message.ends_with("is out of range for u64")
        ));

        let negative: Result<u32> = number().read(&json!(-1));
        let err = negative.unwrap_err();
        assert_eq!(
            err.violations()[0].kind,
            ErrorKind::Custom {
                message: "-1 is out of range for u32".to_string()
            }
        );
    }

    #[test]
    fn test_floats() {
        let f: f64 = number().read(&json!(2)).unwrap();
        assert_eq!(f, 2.0);
        assert_eq!(number().write(&1.5f64), json!(1.5));
        assert_eq!(number().write(&f64::NAN), Value::Null);
    }

    #[test]
    fn test_f32_range() {
        let small: f32 = number().read(&json!(0.25)).unwrap();
        assert_eq!(small, 0.25);
        let max: f32 = number().read(&json!(f64::from(f32::MAX))).unwrap();
        assert_eq!(max, f32::MAX);

        let too_big: Result<f32> = number().read(&json!(1e39));
        assert!(matches!(
            too_big.unwrap_err().violations()[0].kind,
            ErrorKind::Custom { ref message } if message.ends_with("is out of range for f32")
        ));
        assert!(Format::<f32>::read(&number(), &json!(-1e39)).is_err());
    }

    #[test]
    fn test_datetime_roundtrip() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let json = datetime().write(&ts);
        assert_eq!(json, json!("2024-01-15T10:30:00Z"));
        assert_eq!(datetime().read(&json).unwrap(), ts);
        assert!(datetime().read(&json!("yesterday")).is_err());
    }

    #[test]
    fn test_value_identity() {
        let doc = json!({"a": [1, null]});
        assert_eq!(value().read(&doc).unwrap(), doc);
        assert_eq!(value().write(&doc), doc);
    }
}
