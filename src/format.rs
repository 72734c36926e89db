//! The [`Format`] capability and its combinators.
//!
//! A format pairs a reader (`&Value -> Result<T>`) with a writer
//! (`&T -> Value`). Formats are plain values: they are built once, usually at
//! start-up, and reused for every read and write afterwards. Everything in this
//! crate, from the scalar formats in [`crate::primitive`] to the container and
//! tagged-union formats, implements the same trait and nests freely.
//!
//! ## Deriving Formats
//!
//! [`FormatExt`] is implemented for every format and adds:
//!
//! - [`FormatExt::inmap`]: convert to and from another type
//! - [`FormatExt::filter`]: reject values that fail a predicate
//! - [`FormatExt::and_then`]: fallible conversion on read
//! - [`FormatExt::shared`]: erase the concrete type behind an `Arc`
//!
//! ```rust
//! use json_formats::{primitive, Format, FormatExt};
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct Celsius(f64);
//!
//! let celsius = primitive::number()
//!     .filter("below absolute zero", |t: &f64| *t >= -273.15)
//!     .inmap(Celsius, |c: &Celsius| c.0);
//!
//! assert_eq!(celsius.read(&json!(21.5)).unwrap(), Celsius(21.5));
//! assert_eq!(celsius.write(&Celsius(-4.0)), json!(-4.0));
//! assert!(celsius.read(&json!(-300.0)).is_err());
//! ```

use crate::{Result, ValidationError};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Reads a `T` from a JSON tree and writes a `T` back to one.
///
/// Implementations must not mutate shared state: the same format may be used
/// by many callers at once.
pub trait Format<T> {
    /// Decodes `json`, reporting every violation found.
    fn read(&self, json: &Value) -> Result<T>;

    /// Encodes `value` as a new JSON tree.
    fn write(&self, value: &T) -> Value;
}

/// A type-erased format that can be shared across threads.
pub type SharedFormat<T> = Arc<dyn Format<T> + Send + Sync>;

impl<T, F: Format<T> + ?Sized> Format<T> for &F {
    fn read(&self, json: &Value) -> Result<T> {
        (**self).read(json)
    }

    fn write(&self, value: &T) -> Value {
        (**self).write(value)
    }
}

impl<T, F: Format<T> + ?Sized> Format<T> for Box<F> {
    fn read(&self, json: &Value) -> Result<T> {
        (**self).read(json)
    }

    fn write(&self, value: &T) -> Value {
        (**self).write(value)
    }
}

impl<T, F: Format<T> + ?Sized> Format<T> for Arc<F> {
    fn read(&self, json: &Value) -> Result<T> {
        (**self).read(json)
    }

    fn write(&self, value: &T) -> Value {
        (**self).write(value)
    }
}

/// Combinators available on every [`Format`].
pub trait FormatExt<T>: Format<T> + Sized {
    /// Maps this format onto `U` with a pair of total conversions.
    fn inmap<U, R, W>(self, read: R, write: W) -> InMap<Self, R, W, T>
    where
        R: Fn(T) -> U,
        W: Fn(&U) -> T,
    {
        InMap {
            inner: self,
            read,
            write,
            _marker: PhantomData,
        }
    }

    /// Fails reads whose decoded value does not satisfy `predicate`.
    ///
    /// Writes are unaffected.
    fn filter<P>(self, message: impl Into<String>, predicate: P) -> Filter<Self, P>
    where
        P: Fn(&T) -> bool,
    {
        Filter {
            inner: self,
            predicate,
            message: message.into(),
        }
    }

    /// Maps this format onto `U` with a conversion that may fail on read.
    fn and_then<U, R, W>(self, read: R, write: W) -> AndThen<Self, R, W, T>
    where
        R: Fn(T) -> Result<U>,
        W: Fn(&U) -> T,
    {
        AndThen {
            inner: self,
            read,
            write,
            _marker: PhantomData,
        }
    }

    /// Erases this format into a [`SharedFormat`].
    fn shared(self) -> SharedFormat<T>
    where
        Self: Send + Sync + 'static,
    {
        Arc::new(self)
    }
}

impl<T, F: Format<T>> FormatExt<T> for F {}

/// Format returned by [`FormatExt::inmap`].
pub struct InMap<F, R, W, T> {
    inner: F,
    read: R,
    write: W,
    _marker: PhantomData<fn() -> T>,
}

impl<T, U, F, R, W> Format<U> for InMap<F, R, W, T>
where
    F: Format<T>,
    R: Fn(T) -> U,
    W: Fn(&U) -> T,
{
    fn read(&self, json: &Value) -> Result<U> {
        self.inner.read(json).map(&self.read)
    }

    fn write(&self, value: &U) -> Value {
        self.inner.write(&(self.write)(value))
    }
}

/// Format returned by [`FormatExt::filter`].
pub struct Filter<F, P> {
    inner: F,
    predicate: P,
    message: String,
}

impl<T, F, P> Format<T> for Filter<F, P>
where
    F: Format<T>,
    P: Fn(&T) -> bool,
{
    fn read(&self, json: &Value) -> Result<T> {
        let value = self.inner.read(json)?;
        if (self.predicate)(&value) {
            Ok(value)
        } else {
            Err(ValidationError::custom(&self.message))
        }
    }

    fn write(&self, value: &T) -> Value {
        self.inner.write(value)
    }
}

/// Format returned by [`FormatExt::and_then`].
pub struct AndThen<F, R, W, T> {
    inner: F,
    read: R,
    write: W,
    _marker: PhantomData<fn() -> T>,
}

impl<T, U, F, R, W> Format<U> for AndThen<F, R, W, T>
where
    F: Format<T>,
    R: Fn(T) -> Result<U>,
    W: Fn(&U) -> T,
{
    fn read(&self, json: &Value) -> Result<U> {
        self.inner.read(json).and_then(&self.read)
    }

    fn write(&self, value: &U) -> Value {
        self.inner.write(&(self.write)(value))
    }
}

/// A format assembled from a reader closure and a writer closure.
pub struct FnFormat<R, W> {
    read: R,
    write: W,
}

/// Builds a format from two closures.
///
/// This is the usual way to describe records: read the fields with
/// [`crate::object::read_field`] and combine them with
/// [`crate::merge_results!`], write them into a fresh object.
///
/// # Examples
///
/// ```rust
/// use json_formats::{format_fn, Format, Result, ValidationError};
/// use serde_json::{json, Value};
///
/// let even = format_fn(
///     |json: &Value| -> Result<u64> {
///         match json.as_u64() {
///             Some(n) if n % 2 == 0 => Ok(n),
///             _ => Err(ValidationError::custom("expected an even number")),
///         }
///     },
///     |n: &u64| json!(n),
/// );
///
/// assert_eq!(even.read(&json!(4)).unwrap(), 4);
/// assert!(even.read(&json!(3)).is_err());
/// ```
#[must_use]
pub fn format_fn<T, R, W>(read: R, write: W) -> FnFormat<R, W>
where
    R: Fn(&Value) -> Result<T>,
    W: Fn(&T) -> Value,
{
    FnFormat { read, write }
}

impl<T, R, W> Format<T> for FnFormat<R, W>
where
    R: Fn(&Value) -> Result<T>,
    W: Fn(&T) -> Value,
{
    fn read(&self, json: &Value) -> Result<T> {
        (self.read)(json)
    }

    fn write(&self, value: &T) -> Value {
        (self.write)(value)
    }
}
