//! Forward references for recursive formats.
//!
//! A format for a recursive type needs itself before it exists: the format of
//! a tree node contains a sequence of node formats. [`Deferred`] breaks the
//! cycle. Create the cell, build the real format using the cell wherever the
//! recursion happens, then bind the finished format into the cell.
//!
//! ```rust
//! use json_formats::{format_fn, object, seq, Deferred, Format};
//! use serde_json::{json, Map, Value};
//!
//! #[derive(Debug, PartialEq)]
//! struct Node {
//!     children: Vec<Node>,
//! }
//!
//! let node = Deferred::<Node>::new();
//! let children = seq(node.clone());
//! let children_out = seq(node.clone());
//! node.bind(format_fn(
//!     move |json: &Value| {
//!         let obj = object::as_object(json)?;
//!         let children = object::read_field(obj, "children", &children)?;
//!         Ok(Node { children })
//!     },
//!     move |n: &Node| {
//!         let mut obj = Map::new();
//!         obj.insert("children".to_string(), children_out.write(&n.children));
//!         Value::Object(obj)
//!     },
//! ))
//! .unwrap();
//!
//! let doc = json!({"children": [{"children": []}, {"children": [{"children": []}]}]});
//! let tree = node.read(&doc).unwrap();
//! assert_eq!(tree.children.len(), 2);
//! assert_eq!(node.write(&tree), doc);
//! ```
//!
//! ## Binding Discipline
//!
//! A cell is bound once, during construction of the format graph, before the
//! graph is handed to any reader or writer. Binding a second time is rejected
//! with [`BindError::AlreadyBound`]. Reading or writing through a cell that was
//! never bound is a wiring bug, not bad input, and panics.
//!
//! The binding slot is a [`OnceLock`], so a cell bound on one thread can be
//! read from others afterwards. Binding while other threads already read
//! through the cell is outside the contract.
//!
//! ## Lifetime
//!
//! A recursive format is a reference cycle: the cell's slot holds the bound
//! format, and that format holds clones of the cell. The graph is never freed,
//! even after every handle is dropped. Build recursive formats once and keep
//! them for the life of the program (in a `static` or an application-wide
//! struct) instead of rebuilding them per request.

use crate::{Format, Result, SharedFormat};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Error returned by [`Deferred::bind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The cell already has a delegate.
    #[error("deferred format is already bound")]
    AlreadyBound,
}

/// A single-assignment slot for a format that is not available yet.
///
/// Clones share the slot: binding any clone binds them all.
pub struct Deferred<T> {
    slot: Arc<OnceLock<SharedFormat<T>>>,
}

impl<T> Deferred<T> {
    /// Creates an unbound cell.
    #[must_use]
    pub fn new() -> Self {
        Deferred {
            slot: Arc::new(OnceLock::new()),
        }
    }

    /// Binds `format` as the delegate of this cell.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::AlreadyBound`] if the cell already has a delegate;
    /// the existing delegate is kept.
    pub fn bind<F>(&self, format: F) -> std::result::Result<(), BindError>
    where
        F: Format<T> + Send + Sync + 'static,
    {
        self.bind_shared(Arc::new(format))
    }

    /// Binds an already shared format as the delegate of this cell.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::AlreadyBound`] if the cell already has a delegate.
    pub fn bind_shared(&self, format: SharedFormat<T>) -> std::result::Result<(), BindError> {
        self.slot
            .set(format)
            .map_err(|_| BindError::AlreadyBound)?;
        log::debug!(
            "bound deferred format for {}",
            std::any::type_name::<T>()
        );
        Ok(())
    }

    /// Returns `true` once a delegate has been bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.slot.get().is_some()
    }

    fn delegate(&self) -> &SharedFormat<T> {
        match self.slot.get() {
            Some(format) => format,
            None => panic!(
                "deferred format for {} used before it was bound",
                std::any::type_name::<T>()
            ),
        }
    }
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Deferred {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// # Panics
///
/// Both methods panic if the cell has not been bound.
impl<T> Format<T> for Deferred<T> {
    fn read(&self, json: &Value) -> Result<T> {
        self.delegate().read(json)
    }

    fn write(&self, value: &T) -> Value {
        self.delegate().write(value)
    }
}
