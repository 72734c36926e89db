//! Locations inside a JSON tree.
//!
//! A [`Path`] is the sequence of object keys and array indices leading from the
//! document root to the node a violation was found at. Readers build paths
//! bottom-up: a nested failure starts at the root of the sub-tree it was read
//! from and every enclosing format prepends its own step while the error
//! travels back up.
//!
//! ## Rendering
//!
//! Keys render as `/key`, indices as `[i]`, and the root as `/`:
//!
//! ```rust
//! use json_formats::{Path, PathNode};
//!
//! let path = Path::root()
//!     .prepend(PathNode::Key("name".into()))
//!     .prepend(PathNode::Index(2))
//!     .prepend(PathNode::Key("users".into()));
//! assert_eq!(path.to_string(), "/users[2]/name");
//! assert_eq!(Path::root().to_string(), "/");
//! ```

use serde::{Serialize, Serializer};
use std::fmt;

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathNode {
    /// A field of an object.
    Key(String),
    /// An element of an array.
    Index(usize),
}

impl fmt::Display for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathNode::Key(key) => write!(f, "/{}", key),
            PathNode::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl From<&str> for PathNode {
    fn from(key: &str) -> Self {
        PathNode::Key(key.to_string())
    }
}

impl From<String> for PathNode {
    fn from(key: String) -> Self {
        PathNode::Key(key)
    }
}

impl From<usize> for PathNode {
    fn from(index: usize) -> Self {
        PathNode::Index(index)
    }
}

/// A location in a JSON tree, relative to the document root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<PathNode>);

impl Path {
    /// The empty path, pointing at the document root.
    #[must_use]
    pub fn root() -> Self {
        Path(Vec::new())
    }

    /// Returns `true` if this path points at the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The steps of this path, outermost first.
    #[must_use]
    pub fn nodes(&self) -> &[PathNode] {
        &self.0
    }

    /// Returns this path with `node` placed in front of it.
    #[must_use]
    pub fn prepend(mut self, node: PathNode) -> Self {
        self.0.insert(0, node);
        self
    }

    /// Returns this path with `node` appended after its last step.
    #[must_use]
    pub fn push(mut self, node: PathNode) -> Self {
        self.0.push(node);
        self
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for node in &self.0 {
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromIterator<PathNode> for Path {
    fn from_iter<I: IntoIterator<Item = PathNode>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}
