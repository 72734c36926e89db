//! # json_formats
//!
//! Composable, bidirectional formats between typed Rust values and JSON trees.
//!
//! ## What is a Format?
//!
//! A [`Format<T>`] reads a `T` out of a [`serde_json::Value`] and writes a `T`
//! back into one. Formats are small values that nest: a format for
//! `Vec<Option<u32>>` is `seq(optional_array(primitive::number()))`. Reading
//! never stops at the first problem when the problems are independent; the
//! returned [`ValidationError`] lists every violation with its [`Path`].
//!
//! ## Key Features
//!
//! - **Tagged Unions**: [`add_type`] / [`strip_type`] merge a discriminant into
//!   the payload object, and [`TaggedUnion`] dispatches on it
//! - **Recursive Formats**: [`Deferred`] is a forward reference for formats of
//!   self-referential types
//! - **Aggregated Errors**: [`merge_results!`] validates independent fields and
//!   reports all failures at once
//! - **Container Formats**: [`seq`], [`map`], [`enum_value`], [`enum_set`] and
//!   [`optional_array`]
//!
//! ## Quick Start
//!
//! ```rust
//! use json_formats::{
//!     enum_set, enumeration, format_fn, from_str, merge_results, object, primitive, to_string,
//!     Format,
//! };
//! use indexmap::IndexSet;
//! use serde_json::{Map, Value};
//!
//! enumeration! {
//!     pub enum Role {
//!         Admin => "admin",
//!         Guest => "guest",
//!     }
//! }
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     name: String,
//!     roles: IndexSet<Role>,
//! }
//!
//! let user = format_fn(
//!     |json: &Value| {
//!         let obj = object::as_object(json)?;
//!         merge_results!(
//!             name = object::read_field(obj, "name", &primitive::string()),
//!             roles = object::read_field(obj, "roles", &enum_set()),
//!             => User { name, roles }
//!         )
//!     },
//!     |u: &User| {
//!         let mut obj = Map::new();
//!         obj.insert("name".to_string(), primitive::string().write(&u.name));
//!         obj.insert("roles".to_string(), enum_set().write(&u.roles));
//!         Value::Object(obj)
//!     },
//! );
//!
//! let alice: User = from_str(r#"{"name": "Alice", "roles": ["admin"]}"#, &user).unwrap();
//! assert!(alice.roles.contains(&Role::Admin));
//! assert_eq!(to_string(&alice, &user).unwrap(), r#"{"name":"Alice","roles":["admin"]}"#);
//!
//! // Every bad field is reported.
//! let err = from_str::<User, _>(r#"{"name": 1, "roles": ["root"]}"#, &user).unwrap_err();
//! assert_eq!(err.validation().unwrap().len(), 2);
//! ```
//!
//! ## Document Model
//!
//! Trees are [`serde_json::Value`]s with insertion-ordered objects. Parsing and
//! printing text is left to `serde_json`; the `from_*` and `to_*` functions in
//! this module only pair it with a format.
//!
//! ## Sharing Formats
//!
//! Formats hold no mutable state once built and can be shared between threads
//! when their parts can. [`FormatExt::shared`] erases a format into a
//! [`SharedFormat`]. The one exception to immutability is [`Deferred`], which
//! must be bound before the format graph is shared.

#[macro_use]
mod macros;

pub mod deferred;
pub mod enumeration;
pub mod error;
pub mod format;
pub mod map;
pub mod merge;
pub mod object;
pub mod optional;
pub mod options;
pub mod path;
pub mod primitive;
pub mod seq;
pub mod tagged;
pub mod validation;

pub use deferred::{BindError, Deferred};
pub use enumeration::{enum_set, enum_value, EnumSetFormat, EnumValueFormat, Enumeration};
pub use error::Error;
pub use format::{format_fn, Format, FormatExt, SharedFormat};
pub use map::{map, KeyFormat, MapFormat, ParsedKey, StringKey};
pub use merge::{merge_errors, merge_results, Validated};
pub use optional::{optional_array, OptionalArrayFormat};
pub use options::WriteOptions;
pub use path::{Path, PathNode};
pub use seq::{seq, SeqFormat};
pub use serde_json::Value;
pub use tagged::{add_type, strip_type, TaggedUnion};
pub use validation::{ErrorKind, Result, ValidationError, Violation};

use serde::Serialize;
use std::io;

/// Parses `s` as JSON and reads it with `format`.
///
/// # Examples
///
/// ```rust
/// use json_formats::{from_str, optional_array, primitive};
///
/// let n: Option<u32> = from_str("[7]", &optional_array(primitive::number())).unwrap();
/// assert_eq!(n, Some(7));
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] if `s` is not valid JSON and [`Error::Invalid`]
/// with the full report if `format` rejects the document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T, F>(s: &str, format: &F) -> std::result::Result<T, Error>
where
    F: Format<T> + ?Sized,
{
    let json: Value = serde_json::from_str(s)?;
    read_document(&json, format)
}

/// Parses bytes of JSON text and reads them with `format`.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON or the format rejects the
/// document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T, F>(v: &[u8], format: &F) -> std::result::Result<T, Error>
where
    F: Format<T> + ?Sized,
{
    let json: Value = serde_json::from_slice(v)?;
    read_document(&json, format)
}

/// Parses JSON text from an I/O stream and reads it with `format`.
///
/// # Examples
///
/// ```rust
/// use json_formats::{from_reader, primitive, seq};
/// use std::io::Cursor;
///
/// let names: Vec<String> = from_reader(Cursor::new(b"[\"a\", \"b\"]"), &seq(primitive::string())).unwrap();
/// assert_eq!(names, vec!["a", "b"]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid JSON, or the
/// format rejects the document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T, F>(reader: R, format: &F) -> std::result::Result<T, Error>
where
    R: io::Read,
    F: Format<T> + ?Sized,
{
    let json: Value = serde_json::from_reader(reader)?;
    read_document(&json, format)
}

fn read_document<T, F>(json: &Value, format: &F) -> std::result::Result<T, Error>
where
    F: Format<T> + ?Sized,
{
    format.read(json).map_err(|report| {
        log::debug!("document rejected with {} violation(s)", report.len());
        Error::Invalid(report)
    })
}

/// Writes `value` with `format` and prints it as compact JSON.
///
/// # Errors
///
/// Printing a tree into memory does not fail in practice; the `Result` mirrors
/// the writer-based functions.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T, F>(value: &T, format: &F) -> std::result::Result<String, Error>
where
    F: Format<T> + ?Sized,
{
    to_string_with_options(value, format, WriteOptions::default())
}

/// Writes `value` with `format` and pretty-prints it with 2-space indentation.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T, F>(value: &T, format: &F) -> std::result::Result<String, Error>
where
    F: Format<T> + ?Sized,
{
    to_string_with_options(value, format, WriteOptions::pretty())
}

/// Writes `value` with `format` and prints it according to `options`.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T, F>(
    value: &T,
    format: &F,
    options: WriteOptions,
) -> std::result::Result<String, Error>
where
    F: Format<T> + ?Sized,
{
    let mut buffer = Vec::new();
    to_writer_with_options(&mut buffer, value, format, options)?;
    String::from_utf8(buffer).map_err(Error::custom)
}

/// Writes `value` with `format` and prints compact JSON to `writer`.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T, F>(writer: W, value: &T, format: &F) -> std::result::Result<(), Error>
where
    W: io::Write,
    F: Format<T> + ?Sized,
{
    to_writer_with_options(writer, value, format, WriteOptions::default())
}

/// Writes `value` with `format` and prints it to `writer` according to
/// `options`.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T, F>(
    mut writer: W,
    value: &T,
    format: &F,
    options: WriteOptions,
) -> std::result::Result<(), Error>
where
    W: io::Write,
    F: Format<T> + ?Sized,
{
    let tree = format.write(value);
    if options.pretty {
        let indent = options.indent_bytes();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        tree.serialize(&mut serializer)?;
    } else {
        serde_json::to_writer(&mut writer, &tree)?;
    }
    Ok(())
}
