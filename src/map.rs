//! String-keyed maps as JSON objects.
//!
//! This module provides [`MapFormat`], which reads a JSON object into an
//! [`IndexMap`] and writes one back. `IndexMap` keeps the field order of the
//! input document, so a map read and written again produces its fields in the
//! same order.
//!
//! Object keys are always strings. A [`KeyFormat`] converts them to and from
//! the map's key type:
//!
//! - [`StringKey`]: keys stay strings
//! - [`ParsedKey`]: keys go through `FromStr` and `Display`
//! - [`crate::EnumValueFormat`]: keys are enumeration members
//!
//! ## Examples
//!
//! ```rust
//! use json_formats::{map, primitive, Format, ParsedKey};
//! use indexmap::IndexMap;
//! use serde_json::json;
//!
//! let scores = map(ParsedKey, primitive::number());
//! let read: IndexMap<u32, u32> = scores.read(&json!({"7": 1, "12": 2})).unwrap();
//! assert_eq!(read.get(&12), Some(&2));
//! assert_eq!(scores.write(&read), json!({"7": 1, "12": 2}));
//! ```
//!
//! ## Lossy keys
//!
//! Conversions that are not one-to-one collapse entries. On read, two fields
//! that convert to the same key keep the last one. On write, two keys that
//! stringify to the same field keep the last one. [`ParsedKey`] is lossy when
//! `Display` does not print the canonical form of what `FromStr` accepts, for
//! example `"007"` and `"7"` both read as `7u32`.

use crate::{Format, Result, ValidationError};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;

/// Converts object keys to and from a map key type.
///
/// Unlike a [`Format`], a key format only ever sees strings.
pub trait KeyFormat<K> {
    /// Converts an object key into a map key.
    fn read_key(&self, key: &str) -> Result<K>;

    /// Converts a map key into an object key.
    fn write_key(&self, key: &K) -> String;
}

/// Keys that stay strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringKey;

impl KeyFormat<String> for StringKey {
    fn read_key(&self, key: &str) -> Result<String> {
        Ok(key.to_string())
    }

    fn write_key(&self, key: &String) -> String {
        key.clone()
    }
}

/// Keys parsed with `FromStr` and printed with `Display`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParsedKey;

impl<K> KeyFormat<K> for ParsedKey
where
    K: FromStr + Display,
    K::Err: Display,
{
    fn read_key(&self, key: &str) -> Result<K> {
        key.parse()
            .map_err(|e| ValidationError::custom(format!("invalid key {:?}: {}", key, e)))
    }

    fn write_key(&self, key: &K) -> String {
        key.to_string()
    }
}

/// Format for objects whose fields all share one value format.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapFormat<KF, VF> {
    keys: KF,
    values: VF,
}

/// Returns the map format built from a key format and a value format.
#[must_use]
pub fn map<KF, VF>(keys: KF, values: VF) -> MapFormat<KF, VF> {
    MapFormat { keys, values }
}

impl<K, V, KF, VF> Format<IndexMap<K, V>> for MapFormat<KF, VF>
where
    K: Hash + Eq,
    KF: KeyFormat<K>,
    VF: Format<V>,
{
    fn read(&self, json: &Value) -> Result<IndexMap<K, V>> {
        let fields = match json {
            Value::Object(fields) => fields,
            other => return Err(ValidationError::type_mismatch("object", other)),
        };

        let mut entries = IndexMap::with_capacity(fields.len());
        let mut errors = ValidationError::default();
        for (name, field) in fields {
            let key = self.keys.read_key(name);
            let value = self.values.read(field);
            match (key, value) {
                (Ok(key), Ok(value)) => {
                    entries.insert(key, value);
                }
                (key, value) => {
                    if let Err(e) = key {
                        errors.append(e.at_key(name));
                    }
                    if let Err(e) = value {
                        errors.append(e.at_key(name));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(entries)
        } else {
            Err(errors)
        }
    }

    fn write(&self, value: &IndexMap<K, V>) -> Value {
        let mut fields = Map::with_capacity(value.len());
        for (key, entry) in value {
            fields.insert(self.keys.write_key(key), self.values.write(entry));
        }
        Value::Object(fields)
    }
}
