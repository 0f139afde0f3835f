//! Typed validation of untrusted input.
//!
//! Raw values arrive as [`serde_json::Value`]. A *type narrower* asserts a
//! runtime type and extracts it; *validators* then constrain the typed value
//! without transforming it. Both report failure as `Err(String)` and never
//! panic, so they chain with `Result::and_then` and stop at the first
//! failure:
//!
//! ```
//! use serde_json::json;
//! use shepherd::validation::{as_string, as_trimmed, with_max_length};
//!
//! let name = as_string(&json!("ada"))
//!     .and_then(|s| as_trimmed(&s).map(str::to_owned))
//!     .and_then(with_max_length(32));
//! assert_eq!(name, Ok("ada".to_string()));
//! ```

pub mod narrower;
pub mod validators;

pub use narrower::{
    as_any_number, as_array, as_bool, as_instance_of, as_int, as_number, as_string, lift,
};
pub use validators::{
    as_digit, as_hex, as_hex_lower_cased, as_lower_cased, as_printable_chars, as_trimmed,
    as_url_safe, between_range, one_of_set, one_of_set_with_message, with_byte_length,
    with_byte_length_between_range, with_length, with_length_between_range, with_max,
    with_max_byte_length, with_max_length, with_min, with_min_byte_length, with_min_length,
    Length,
};

use serde_json::Value;

/// Asserts the runtime type of an unknown value, yielding it as `T`.
pub trait TypeNarrower<T>: Fn(&Value) -> Result<T, String> {}

impl<T, F> TypeNarrower<T> for F where F: Fn(&Value) -> Result<T, String> {}

/// Checks a constraint on an already typed value, passing it through
/// unchanged on success.
pub trait Validator<T>: Fn(T) -> Result<T, String> {}

impl<T, F> Validator<T> for F where F: Fn(T) -> Result<T, String> {}

/// Narrows `x` and runs `validate` on the result.
pub fn narrow_then<T, N, V>(x: &Value, narrower: N, validate: V) -> Result<T, String>
where
    N: TypeNarrower<T>,
    V: Validator<T>,
{
    narrower(x).and_then(|value| validate(value))
}
