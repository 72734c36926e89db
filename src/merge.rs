//! Combining independent validations into one report.
//!
//! Reading a record means validating each field on its own. Stopping at the
//! first bad field hides the rest, so the functions here take every field's
//! result at once and concatenate all failures, in argument order.
//!
//! The results usually have different success types, so they are passed as
//! `&dyn Validated`. The [`crate::merge_errors!`] and [`crate::merge_results!`]
//! macros hide the casts.
//!
//! ```rust
//! use json_formats::{merge_results, Result, ValidationError};
//!
//! let name: Result<String> = Err(ValidationError::missing_field().at_key("name"));
//! let age: Result<u32> = Ok(30);
//! let email: Result<String> = Err(ValidationError::custom("no @").at_key("email"));
//!
//! let merged = merge_results(&[&name, &age, &email], || unreachable!());
//! let paths: Vec<String> = merged
//!     .unwrap_err()
//!     .violations()
//!     .iter()
//!     .map(|v| v.path.to_string())
//!     .collect();
//! assert_eq!(paths, vec!["/name", "/email"]);
//! ```

use crate::{Result, ValidationError};

/// Anything that may hold a [`ValidationError`].
pub trait Validated {
    /// The failure, if this outcome failed.
    fn failure(&self) -> Option<&ValidationError>;
}

impl<T> Validated for Result<T> {
    fn failure(&self) -> Option<&ValidationError> {
        self.as_ref().err()
    }
}

/// Concatenates the failures of `results` in argument order.
///
/// Successful results contribute nothing. Meant for callers that already know
/// at least one input failed; when none did, the returned report is empty.
#[must_use]
pub fn merge_errors(results: &[&dyn Validated]) -> ValidationError {
    let mut merged = ValidationError::default();
    for failure in results.iter().filter_map(|r| r.failure()) {
        merged.append(failure.clone());
    }
    merged
}

/// Succeeds with `value()` if every result succeeded, otherwise fails with
/// the concatenation of all failures.
///
/// `value` is only called on success.
pub fn merge_results<V, F>(results: &[&dyn Validated], value: F) -> Result<V>
where
    F: FnOnce() -> V,
{
    let errors = merge_errors(results);
    if errors.is_empty() {
        Ok(value())
    } else {
        Err(errors)
    }
}
