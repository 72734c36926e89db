/// Concatenates the failures of any number of results, in argument order.
///
/// Expands to [`crate::merge::merge_errors`] with each argument borrowed as a
/// `&dyn Validated`.
///
/// # Examples
///
/// ```rust
/// use json_formats::{merge_errors, Result, ValidationError};
///
/// let a: Result<u8> = Err(ValidationError::custom("a"));
/// let b: Result<String> = Ok("fine".to_string());
/// let c: Result<bool> = Err(ValidationError::custom("c"));
///
/// assert_eq!(merge_errors!(a, b, c).len(), 2);
/// ```
#[macro_export]
macro_rules! merge_errors {
    ($($result:expr),* $(,)?) => {
        $crate::merge::merge_errors(&[$(&$result as &dyn $crate::Validated),*])
    };
}

/// Binds each named result and evaluates the final expression only if all of
/// them succeeded.
///
/// Inside the final expression every name refers to the success value of its
/// result. If any result failed, the macro evaluates to an `Err` holding every
/// failure in argument order and the final expression is never evaluated.
///
/// # Examples
///
/// ```rust
/// use json_formats::{merge_results, object, primitive, Result};
/// use serde_json::json;
///
/// #[derive(Debug, PartialEq)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let doc = json!({"name": "Alice", "age": 30});
/// let obj = object::as_object(&doc).unwrap();
///
/// let user: Result<User> = merge_results!(
///     name = object::read_field(obj, "name", &primitive::string()),
///     age = object::read_field(obj, "age", &primitive::number()),
///     => User { name, age }
/// );
/// assert_eq!(user.unwrap(), User { name: "Alice".to_string(), age: 30 });
/// ```
#[macro_export]
macro_rules! merge_results {
    ($($name:ident = $result:expr),+ $(,)? => $value:expr) => {{
        $(let $name = $result;)+
        let errors = $crate::merge::merge_errors(&[$(&$name as &dyn $crate::Validated),+]);
        if errors.is_empty() {
            $(
                let $name = match $name {
                    ::core::result::Result::Ok(value) => value,
                    ::core::result::Result::Err(_) => ::core::unreachable!(),
                };
            )+
            ::core::result::Result::Ok($value)
        } else {
            ::core::result::Result::Err(errors)
        }
    }};
}

/// Declares a fieldless enum together with its canonical string table and
/// implements [`crate::Enumeration`] for it.
///
/// The enum derives `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
/// `PartialOrd` and `Ord`; further attributes are passed through.
///
/// # Examples
///
/// ```rust
/// use json_formats::{enumeration, Enumeration};
///
/// enumeration! {
///     pub enum Weekday {
///         Monday => "mon",
///         Tuesday => "tue",
///     }
/// }
///
/// assert_eq!(Weekday::Monday.as_str(), "mon");
/// assert_eq!(Weekday::parse("tue"), Some(Weekday::Tuesday));
/// assert_eq!(Weekday::MEMBERS.len(), 2);
/// ```
#[macro_export]
macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident => $repr:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $crate::Enumeration for $name {
            const MEMBERS: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $repr),+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::Enumeration::as_str(self))
            }
        }
    };
}
