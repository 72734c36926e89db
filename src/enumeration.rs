//! Enumerations as JSON strings, and sets of them as JSON arrays.
//!
//! An [`Enumeration`] is a closed type with a finite member list and one
//! canonical string per member. The [`crate::enumeration!`] macro declares
//! both at once.
//!
//! ## Examples
//!
//! ```rust
//! use json_formats::{enum_set, enum_value, enumeration, Format};
//! use serde_json::json;
//!
//! enumeration! {
//!     pub enum Permission {
//!         Read => "read",
//!         Write => "write",
//!     }
//! }
//!
//! assert_eq!(enum_value::<Permission>().read(&json!("write")).unwrap(), Permission::Write);
//!
//! let set = enum_set::<Permission>().read(&json!(["read", "write", "read"])).unwrap();
//! assert_eq!(set.len(), 2);
//! assert_eq!(enum_set().write(&set), json!(["read", "write"]));
//! ```

use crate::map::KeyFormat;
use crate::{Format, Result, ValidationError};
use indexmap::IndexSet;
use serde_json::Value;
use std::hash::Hash;
use std::marker::PhantomData;

/// A closed set of values with canonical string names.
pub trait Enumeration: Copy + Eq + Hash + 'static {
    /// Every member, in declaration order.
    const MEMBERS: &'static [Self];

    /// The canonical string of this member.
    fn as_str(&self) -> &'static str;

    /// Looks up the member whose canonical string is `s`.
    fn parse(s: &str) -> Option<Self> {
        Self::MEMBERS.iter().copied().find(|m| m.as_str() == s)
    }
}

/// Format for a single enumeration member encoded as its canonical string.
pub struct EnumValueFormat<E> {
    _marker: PhantomData<fn() -> E>,
}

/// Returns the format for members of `E`.
#[must_use]
pub fn enum_value<E: Enumeration>() -> EnumValueFormat<E> {
    EnumValueFormat {
        _marker: PhantomData,
    }
}

impl<E> Clone for EnumValueFormat<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EnumValueFormat<E> {}

fn parse_member<E: Enumeration>(s: &str) -> Result<E> {
    E::parse(s).ok_or_else(|| ValidationError::undefined_value(s))
}

impl<E: Enumeration> Format<E> for EnumValueFormat<E> {
    fn read(&self, json: &Value) -> Result<E> {
        match json {
            Value::String(s) => parse_member(s),
            other => Err(ValidationError::type_mismatch("string", other)),
        }
    }

    fn write(&self, value: &E) -> Value {
        Value::String(value.as_str().to_string())
    }
}

impl<E: Enumeration> KeyFormat<E> for EnumValueFormat<E> {
    fn read_key(&self, key: &str) -> Result<E> {
        parse_member(key)
    }

    fn write_key(&self, key: &E) -> String {
        key.as_str().to_string()
    }
}

/// Format for a set of enumeration members encoded as an array of strings.
pub struct EnumSetFormat<E> {
    _marker: PhantomData<fn() -> E>,
}

/// Returns the format for sets of `E`.
///
/// Duplicates in the input collapse; the set keeps first-seen order and is
/// written back in that order.
#[must_use]
pub fn enum_set<E: Enumeration>() -> EnumSetFormat<E> {
    EnumSetFormat {
        _marker: PhantomData,
    }
}

impl<E> Clone for EnumSetFormat<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EnumSetFormat<E> {}

impl<E: Enumeration> Format<IndexSet<E>> for EnumSetFormat<E> {
    fn read(&self, json: &Value) -> Result<IndexSet<E>> {
        let items = match json {
            Value::Array(items) => items,
            other => return Err(ValidationError::type_mismatch("array", other)),
        };

        let mut members = IndexSet::with_capacity(items.len());
        let mut errors = ValidationError::default();
        for (i, item) in items.iter().enumerate() {
            let member = match item {
                Value::String(s) => parse_member::<E>(s),
                other => Err(ValidationError::type_mismatch("string", other)),
            };
            match member {
                Ok(member) => {
                    members.insert(member);
                }
                Err(e) => errors.append(e.at_index(i)),
            }
        }

        if errors.is_empty() {
            Ok(members)
        } else {
            Err(errors)
        }
    }

    fn write(&self, value: &IndexSet<E>) -> Value {
        Value::Array(
            value
                .iter()
                .map(|member| Value::String(member.as_str().to_string()))
                .collect(),
        )
    }
}
