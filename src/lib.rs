#![doc = "The `shepherd` library crate."]
#![doc = ""]
#![doc = "Typed validation of untrusted input and safe handling of passwords for the"]
#![doc = "Shepherd backend: type narrowers and validators, a `Password` secret that"]
#![doc = "hashes, compares and scrubs itself out of text, and `WrappedError` cause chains"]
#![doc = "for the places where a failed `Result` becomes fatal."]

pub mod auth;
pub mod config;
pub mod error;
pub mod number;
pub mod time;
pub mod validation;

pub use crate::auth::{Password, ScrubMode};
pub use crate::error::{AppError, WrappedError};
