//! Error chains built by wrapping.
//!
//! A [`WrappedError`] pairs a human message with an optional cause. Causes
//! are either another `WrappedError` (an inner link of the chain) or any
//! other error value (the root). Chains only ever grow outward: there is no
//! way to point an existing error at one of its ancestors, so walking the
//! chain always terminates.

use std::error::Error;
use std::fmt;

/// Boxed error value usable as the root cause of a chain.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

#[derive(Debug)]
enum Cause {
    Wrapped(Box<WrappedError>),
    Root(BoxError),
}

/// An error message chained to the error that caused it.
#[derive(Debug)]
pub struct WrappedError {
    message: String,
    previous: Option<Cause>,
}

impl WrappedError {
    /// Creates an error with no cause. Such an error is its own root.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            previous: None,
        }
    }

    /// Wraps `previous` under `message`.
    ///
    /// Anything convertible into a boxed error is accepted, including plain
    /// `String`s and `&str`s. A `WrappedError` passed here stays a link of
    /// the chain rather than becoming its root.
    pub fn with_cause(message: impl Into<String>, previous: impl Into<BoxError>) -> Self {
        let cause = match previous.into().downcast::<WrappedError>() {
            Ok(wrapped) => Cause::Wrapped(wrapped),
            Err(other) => Cause::Root(other),
        };

        Self {
            message: message.into(),
            previous: Some(cause),
        }
    }

    /// Returns a mapping function that wraps any error with `message`.
    ///
    /// Meant for `Result::map_err` at the point where a recoverable failure
    /// becomes a fatal one.
    pub fn map_wrap<E>(message: &str) -> impl Fn(E) -> WrappedError + '_
    where
        E: Into<BoxError>,
    {
        move |error| WrappedError::with_cause(message, error)
    }

    /// The message of this link only.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The error at the end of the chain.
    ///
    /// Follows wrapped causes until reaching a non-`WrappedError` cause and
    /// returns it. When the innermost `WrappedError` has no cause, that
    /// error is the root and is returned itself.
    pub fn root(&self) -> &(dyn Error + Send + Sync + 'static) {
        let mut current = self;
        loop {
            match &current.previous {
                None => return current,
                Some(Cause::Root(root)) => return &**root,
                Some(Cause::Wrapped(inner)) => current = &**inner,
            }
        }
    }

    /// Every message in the chain, outermost first, ending with the root
    /// cause's message when the root is not a `WrappedError`.
    pub fn spans(&self) -> Vec<String> {
        let mut spans = Vec::new();
        let mut current = self;
        loop {
            spans.push(current.message.clone());
            match &current.previous {
                None => return spans,
                Some(Cause::Root(root)) => {
                    spans.push(root.to_string());
                    return spans;
                }
                Some(Cause::Wrapped(inner)) => current = &**inner,
            }
        }
    }
}

impl fmt::Display for WrappedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for WrappedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.previous {
            None => None,
            Some(Cause::Wrapped(inner)) => Some(&**inner),
            Some(Cause::Root(root)) => Some(&**root),
        }
    }
}
