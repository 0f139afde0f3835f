//! Validators: functions that check a typed value and hand it back
//! unchanged.
//!
//! Failure messages follow `<description>: found <actual>` or
//! `<description>: '<value>'`. The colon separating the description from
//! the echoed input is relied upon by `Password::audit` to strip secret text
//! out of messages, so keep it in any new validator that echoes its input.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

lazy_static! {
    // Characters `encodeURIComponent`-style percent encoding leaves alone.
    static ref URL_SAFE_REGEX: Regex = Regex::new(r"^[A-Za-z0-9\-_.!~*'()]*$").unwrap();
    static ref HEX_REGEX: Regex = Regex::new(r"^[0-9A-Fa-f]*$").unwrap();
    static ref DIGIT_REGEX: Regex = Regex::new(r"^[0-9]*$").unwrap();
}

/// Validates that a string contains no characters that require URL encoding.
pub fn as_url_safe(s: &str) -> Result<&str, String> {
    if !URL_SAFE_REGEX.is_match(s) {
        return Err(format!("text contains invalid characters: '{}'", s));
    }

    Ok(s)
}

/// Validates that a string has no leading or trailing whitespace.
///
/// A byte order mark (U+FEFF) counts as whitespace here, although
/// `str::trim` keeps it.
pub fn as_trimmed(s: &str) -> Result<&str, String> {
    if s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}') != s {
        return Err(format!("text contains untrimmed whitespace: '{}'", s));
    }

    Ok(s)
}

/// Validates that a string is lower-cased.
pub fn as_lower_cased(s: &str) -> Result<&str, String> {
    if s.to_lowercase() != s {
        return Err(format!("text is not lowercase: '{}'", s));
    }

    Ok(s)
}

/// Validates that a string contains only hexadecimal characters.
/// Case insensitive.
pub fn as_hex(s: &str) -> Result<&str, String> {
    if !HEX_REGEX.is_match(s) {
        return Err(format!("text contains invalid hexadecimal characters: '{}'", s));
    }

    Ok(s)
}

/// Validates that a string contains only lower-case hexadecimal characters.
pub fn as_hex_lower_cased(s: &str) -> Result<&str, String> {
    as_hex(s).and_then(as_lower_cased)
}

/// Validates that a string contains no control characters (code points
/// 0-31).
pub fn as_printable_chars(s: &str) -> Result<&str, String> {
    if s.chars().any(|c| u32::from(c) <= 31) {
        return Err(format!("text contains non-printable characters: '{}'", s));
    }

    Ok(s)
}

/// Validates that a string contains only the digits 0-9.
pub fn as_digit(s: &str) -> Result<&str, String> {
    if !DIGIT_REGEX.is_match(s) {
        return Err(format!("text contains non-numeric characters: '{}'", s));
    }

    Ok(s)
}

/// Validates that a number is not greater than `max`.
pub fn with_max<N>(max: N) -> impl Fn(N) -> Result<N, String>
where
    N: PartialOrd + Display + Copy,
{
    move |x| {
        if x > max {
            return Err(format!("the value cannot exceed {}", max));
        }

        Ok(x)
    }
}

/// Validates that a number is not less than `min`.
pub fn with_min<N>(min: N) -> impl Fn(N) -> Result<N, String>
where
    N: PartialOrd + Display + Copy,
{
    move |x| {
        if x < min {
            return Err(format!("the value cannot be less than {}", min));
        }

        Ok(x)
    }
}

/// Validates that a number lies in `min..=max`.
pub fn between_range<N>(min: N, max: N) -> impl Fn(N) -> Result<N, String>
where
    N: PartialOrd + Display + Copy,
{
    move |x| Ok(x).and_then(with_min(min)).and_then(with_max(max))
}

/// Element count of a sequence: `char`s for strings, items for slices.
///
/// Strings count Unicode scalar values, not UTF-16 code units, so a
/// character outside the Basic Multilingual Plane such as "😀" has length 1
/// rather than 2.
pub trait Length {
    fn length(&self) -> usize;
}

impl Length for str {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl Length for String {
    fn length(&self) -> usize {
        self.as_str().length()
    }
}

impl<T> Length for [T] {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> Length for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T: Length + ?Sized> Length for &T {
    fn length(&self) -> usize {
        (**self).length()
    }
}

/// Validates that the length is exactly `len`.
pub fn with_length<T: Length>(len: usize) -> impl Fn(T) -> Result<T, String> {
    move |x| {
        let found = x.length();
        if found != len {
            return Err(format!("the length must be {}: found {}", len, found));
        }

        Ok(x)
    }
}

/// Validates that the length is not less than `min`.
pub fn with_min_length<T: Length>(min: usize) -> impl Fn(T) -> Result<T, String> {
    move |x| {
        let found = x.length();
        if found < min {
            return Err(format!("the length must be at least {}: found {}", min, found));
        }

        Ok(x)
    }
}

/// Validates that the length is not greater than `max`.
pub fn with_max_length<T: Length>(max: usize) -> impl Fn(T) -> Result<T, String> {
    move |x| {
        let found = x.length();
        if found > max {
            return Err(format!("the length cannot exceed {}: found {}", max, found));
        }

        Ok(x)
    }
}

/// Validates that the length lies in `min..=max`.
pub fn with_length_between_range<T: Length>(
    min: usize,
    max: usize,
) -> impl Fn(T) -> Result<T, String> {
    move |x| {
        let found = x.length();
        if found < min || found > max {
            return Err(format!(
                "the length must be between {}-{}: found {}",
                min, max, found
            ));
        }

        Ok(x)
    }
}

/// Validates that the UTF-8 encoded size is exactly `len` bytes.
pub fn with_byte_length<S: AsRef<str>>(len: usize) -> impl Fn(S) -> Result<S, String> {
    move |s| {
        let found = s.as_ref().len();
        if found != len {
            return Err(format!("the byte length must be {}: found {}", len, found));
        }

        Ok(s)
    }
}

/// Validates that the UTF-8 encoded size is at least `min` bytes.
pub fn with_min_byte_length<S: AsRef<str>>(min: usize) -> impl Fn(S) -> Result<S, String> {
    move |s| {
        let found = s.as_ref().len();
        if found < min {
            return Err(format!(
                "the byte length must be at least {}: found {}",
                min, found
            ));
        }

        Ok(s)
    }
}

/// Validates that the UTF-8 encoded size is at most `max` bytes.
pub fn with_max_byte_length<S: AsRef<str>>(max: usize) -> impl Fn(S) -> Result<S, String> {
    move |s| {
        let found = s.as_ref().len();
        if found > max {
            return Err(format!(
                "the byte length cannot exceed {}: found {}",
                max, found
            ));
        }

        Ok(s)
    }
}

/// Validates that the UTF-8 encoded size lies in `min..=max` bytes.
pub fn with_byte_length_between_range<S: AsRef<str>>(
    min: usize,
    max: usize,
) -> impl Fn(S) -> Result<S, String> {
    move |s| {
        let found = s.as_ref().len();
        if found < min || found > max {
            return Err(format!(
                "the byte length must be between {}-{}: found {}",
                min, max, found
            ));
        }

        Ok(s)
    }
}

/// Validates that a value is a member of `set`.
pub fn one_of_set<T: Eq + Hash>(set: HashSet<T>) -> impl Fn(T) -> Result<T, String> {
    one_of_set_with_message(set, "the given value is not one of the expected set of values")
}

/// Like [`one_of_set`], failing with a custom message.
pub fn one_of_set_with_message<T: Eq + Hash>(
    set: HashSet<T>,
    msg: impl Into<String>,
) -> impl Fn(T) -> Result<T, String> {
    let msg = msg.into();
    move |x| {
        if !set.contains(&x) {
            return Err(msg.clone());
        }

        Ok(x)
    }
}
