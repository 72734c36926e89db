//! Tagged unions: values stamped with a discriminant string.
//!
//! [`add_type`] merges a discriminant into the encoded payload and
//! [`strip_type`] splits it off again. An object payload is flattened, with
//! the tag added as one more field:
//!
//! ```text
//! {"radius": 2.0}  + tag "circle"  =>  {"radius": 2.0, "type": "circle"}
//! ```
//!
//! Any other payload is wrapped under a fixed `"value"` field:
//!
//! ```text
//! 42  + tag "int"  =>  {"type": "int", "value": 42}
//! ```
//!
//! On decode, an object whose fields are exactly the tag field and `"value"`
//! is taken to be the wrapped shape. An object payload that happens to have
//! exactly those two fields is therefore unwrapped wrongly. The wire format
//! has no way to tell the two apart, so avoid such payload shapes.
//!
//! Since `"value"` carries wrapped payloads it cannot also be the tag field.
//!
//! [`TaggedUnion`] builds a complete format for an enum out of one format per
//! variant.

use crate::{Format, Result, ValidationError};
use serde_json::{Map, Value};
use std::marker::PhantomData;

/// Field that holds a payload that is not an object.
pub const VALUE_FIELD: &str = "value";

/// Stamps `payload` with `tag_field: tag_value`.
///
/// If `payload` is an object the tag is added to its fields, replacing a field
/// of the same name. Otherwise the result is
/// `{tag_field: tag_value, "value": payload}`.
///
/// `tag_field` must not be [`VALUE_FIELD`]: the wrapped payload would
/// overwrite the tag. Debug builds panic on it.
///
/// # Examples
///
/// ```rust
/// use json_formats::add_type;
/// use serde_json::json;
///
/// assert_eq!(
///     add_type("type", "circle", json!({"radius": 2.0})),
///     json!({"radius": 2.0, "type": "circle"})
/// );
/// assert_eq!(
///     add_type("type", "int", json!(42)),
///     json!({"type": "int", "value": 42})
/// );
/// ```
#[must_use]
pub fn add_type(tag_field: &str, tag_value: &str, payload: Value) -> Value {
    debug_assert!(
        tag_field != VALUE_FIELD,
        "{:?} is reserved for wrapped payloads and cannot be a tag field",
        VALUE_FIELD
    );
    match payload {
        Value::Object(mut fields) => {
            fields.insert(tag_field.to_string(), Value::String(tag_value.to_string()));
            Value::Object(fields)
        }
        other => {
            let mut fields = Map::with_capacity(2);
            fields.insert(tag_field.to_string(), Value::String(tag_value.to_string()));
            fields.insert(VALUE_FIELD.to_string(), other);
            Value::Object(fields)
        }
    }
}

/// Splits a tagged object into its payload and its discriminant.
///
/// # Errors
///
/// Fails with a type mismatch if `data` is not an object, and at `tag_field`
/// if the discriminant is absent or not a string.
///
/// # Examples
///
/// ```rust
/// use json_formats::strip_type;
/// use serde_json::json;
///
/// let (payload, tag) = strip_type("type", &json!({"type": "int", "value": 42})).unwrap();
/// assert_eq!((payload, tag.as_str()), (json!(42), "int"));
///
/// let (payload, tag) = strip_type("type", &json!({"type": "circle", "radius": 2.0})).unwrap();
/// assert_eq!((payload, tag.as_str()), (json!({"radius": 2.0}), "circle"));
/// ```
pub fn strip_type(tag_field: &str, data: &Value) -> Result<(Value, String)> {
    split(tag_field, data).map(|(payload, tag, _)| (payload, tag))
}

/// Like [`strip_type`], also reporting whether the payload was wrapped.
fn split(tag_field: &str, data: &Value) -> Result<(Value, String, bool)> {
    let fields = match data {
        Value::Object(fields) => fields,
        other => return Err(ValidationError::type_mismatch("object", other)),
    };

    let wrapped = is_wrapped(tag_field, fields);
    let payload = if wrapped {
        fields.get(VALUE_FIELD).cloned().unwrap_or(Value::Null)
    } else {
        Value::Object(
            fields
                .iter()
                .filter(|(name, _)| name.as_str() != tag_field)
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        )
    };

    let tag = match fields.get(tag_field) {
        Some(Value::String(tag)) => tag.clone(),
        Some(other) => {
            return Err(ValidationError::type_mismatch("string", other).at_key(tag_field))
        }
        None => return Err(ValidationError::missing_field().at_key(tag_field)),
    };

    Ok((payload, tag, wrapped))
}

/// True when the field names are exactly `{tag_field, "value"}`.
///
/// A `"value"` tag field has no wrapped shape.
fn is_wrapped(tag_field: &str, fields: &Map<String, Value>) -> bool {
    tag_field != VALUE_FIELD
        && fields.len() == 2
        && fields.contains_key(tag_field)
        && fields.contains_key(VALUE_FIELD)
}

trait Variant<T> {
    fn read(&self, payload: &Value) -> Result<T>;
    fn write(&self, value: &T) -> Option<Value>;
}

struct Case<V, F, I, P> {
    format: F,
    inject: I,
    project: P,
    _marker: PhantomData<fn() -> V>,
}

impl<T, V, F, I, P> Variant<T> for Case<V, F, I, P>
where
    F: Format<V>,
    I: Fn(V) -> T,
    P: for<'a> Fn(&'a T) -> Option<&'a V>,
{
    fn read(&self, payload: &Value) -> Result<T> {
        self.format.read(payload).map(&self.inject)
    }

    fn write(&self, value: &T) -> Option<Value> {
        (self.project)(value).map(|inner| self.format.write(inner))
    }
}

/// A format for a sum type, dispatching on a discriminant field.
///
/// Each variant is registered with its discriminant string, the format of its
/// payload, a constructor into the sum type and a projection back out of it.
///
/// # Examples
///
/// ```rust
/// use json_formats::{primitive, Format, TaggedUnion};
/// use serde_json::json;
///
/// #[derive(Debug, PartialEq)]
/// enum Literal {
///     Int(i64),
///     Text(String),
/// }
///
/// let literal = TaggedUnion::new("kind")
///     .variant("int", primitive::number(), Literal::Int, |l: &Literal| match l {
///         Literal::Int(n) => Some(n),
///         _ => None,
///     })
///     .variant("text", primitive::string(), Literal::Text, |l: &Literal| match l {
///         Literal::Text(s) => Some(s),
///         _ => None,
///     });
///
/// let json = literal.write(&Literal::Int(7));
/// assert_eq!(json, json!({"kind": "int", "value": 7}));
/// assert_eq!(literal.read(&json).unwrap(), Literal::Int(7));
/// assert!(literal.read(&json!({"kind": "float", "value": 1.5})).is_err());
/// ```
///
/// # Nested unions
///
/// An object payload that already has a field named like the tag field loses
/// that field on write, because the union's tag replaces it. A variant whose
/// payload is itself a union on the same tag field must therefore place the
/// inner value under a field of its own, e.g. `{"op": "neg", "arg": {...}}`
/// rather than the inner object directly. Writes that overwrite a field this
/// way are logged as warnings.
pub struct TaggedUnion<T> {
    tag_field: String,
    variants: Vec<(String, Box<dyn Variant<T> + Send + Sync>)>,
}

impl<T> TaggedUnion<T> {
    /// Creates a union with no variants that reads its tag from `tag_field`.
    ///
    /// # Panics
    ///
    /// Panics if `tag_field` is [`VALUE_FIELD`], which is reserved for wrapped
    /// payloads.
    #[must_use]
    pub fn new(tag_field: impl Into<String>) -> Self {
        let tag_field = tag_field.into();
        assert!(
            tag_field != VALUE_FIELD,
            "{:?} is reserved for wrapped payloads and cannot be a tag field",
            VALUE_FIELD
        );
        TaggedUnion {
            tag_field,
            variants: Vec::new(),
        }
    }

    /// The name of the discriminant field.
    #[must_use]
    pub fn tag_field(&self) -> &str {
        &self.tag_field
    }

    /// Registers a variant.
    ///
    /// `inject` turns a decoded payload into the sum type; `project` returns
    /// the payload if a value is this variant. Variants are tried in
    /// registration order when writing. Registering a tag twice keeps the first
    /// registration for reads.
    #[must_use]
    pub fn variant<V, F, I, P>(
        mut self,
        tag: impl Into<String>,
        format: F,
        inject: I,
        project: P,
    ) -> Self
    where
        V: 'static,
        T: 'static,
        F: Format<V> + Send + Sync + 'static,
        I: Fn(V) -> T + Send + Sync + 'static,
        P: for<'a> Fn(&'a T) -> Option<&'a V> + Send + Sync + 'static,
    {
        self.variants.push((
            tag.into(),
            Box::new(Case {
                format,
                inject,
                project,
                _marker: PhantomData,
            }),
        ));
        self
    }

    /// The registered discriminants, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|(tag, _)| tag.as_str())
    }
}

impl<T> Format<T> for TaggedUnion<T> {
    fn read(&self, json: &Value) -> Result<T> {
        let (payload, tag, wrapped) = split(&self.tag_field, json)?;
        let variant = match self.variants.iter().find(|(known, _)| *known == tag) {
            Some((_, variant)) => variant,
            None => {
                log::trace!("unknown discriminant {:?} in field {:?}", tag, self.tag_field);
                return Err(ValidationError::undefined_value(&tag).at_key(&self.tag_field));
            }
        };
        variant.read(&payload).map_err(|e| {
            if wrapped {
                e.at_key(VALUE_FIELD)
            } else {
                e
            }
        })
    }

    /// # Panics
    ///
    /// Panics if no registered variant projects `value`. A union is expected to
    /// register every variant of its type.
    fn write(&self, value: &T) -> Value {
        for (tag, variant) in &self.variants {
            if let Some(payload) = variant.write(value) {
                if let Some(shadowed) = payload.get(&self.tag_field) {
                    log::warn!(
                        "variant {:?} payload already has field {:?} ({}), replaced by the tag",
                        tag,
                        self.tag_field,
                        shadowed
                    );
                }
                return add_type(&self.tag_field, tag, payload);
            }
        }
        panic!(
            "no variant of the tagged union on {:?} matches the value",
            self.tag_field
        );
    }
}
