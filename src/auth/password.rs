use serde::{Deserialize, Deserializer};
use std::fmt;
use tokio::task::JoinError;

use super::secret::{ScrubMode, Secret};
use crate::error::WrappedError;
use crate::validation::{as_printable_chars, as_trimmed, with_max_byte_length, with_min_length};

/// Shortest accepted password, in characters.
pub const MIN_LENGTH: usize = 8;
/// bcrypt ignores input past 72 bytes, so longer passwords are rejected.
pub const MAX_BYTE_LENGTH: usize = 72;
/// bcrypt work factor used by [`Password::hash`].
pub const HASH_COST: u32 = 10;

/// Failure of the hashing primitive itself.
///
/// A comparison that runs fine but finds a mismatch is not a `HashError`;
/// it is `Ok(false)`.
#[derive(Debug)]
pub enum HashError {
    /// bcrypt rejected the input (bad cost, malformed stored hash, ...).
    Bcrypt(bcrypt::BcryptError),
    /// The blocking task running bcrypt panicked or was cancelled.
    Interrupted(JoinError),
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HashError::Bcrypt(e) => write!(f, "bcrypt error: {}", e),
            HashError::Interrupted(e) => write!(f, "hashing task did not complete: {}", e),
        }
    }
}

impl std::error::Error for HashError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HashError::Bcrypt(e) => Some(e),
            HashError::Interrupted(e) => Some(e),
        }
    }
}

impl From<bcrypt::BcryptError> for HashError {
    fn from(error: bcrypt::BcryptError) -> HashError {
        HashError::Bcrypt(error)
    }
}

impl From<JoinError> for HashError {
    fn from(error: JoinError) -> HashError {
        HashError::Interrupted(error)
    }
}

/// A plaintext password received from a user.
///
/// Built once where the input arrives (it deserializes straight from a JSON
/// string) and never serialized. Everything it offers is derived from the
/// plaintext without handing the plaintext out.
pub struct Password {
    secret: Secret<String>,
}

impl Password {
    pub const LABEL: &'static str = "Password";

    pub fn new(plaintext: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(Self::LABEL, plaintext.into()),
        }
    }

    fn plaintext(&self) -> &str {
        self.secret.expose()
    }

    /// Hashes the password with bcrypt at [`HASH_COST`].
    pub async fn hash(&self) -> Result<String, HashError> {
        self.hash_with_cost(HASH_COST).await
    }

    /// Hashes the password with bcrypt at the given work factor.
    ///
    /// bcrypt is deliberately slow, so the work runs on tokio's blocking
    /// pool. Dropping the returned future abandons the result; the bcrypt
    /// round itself runs to completion and its copy of the plaintext is
    /// zeroed.
    pub async fn hash_with_cost(&self, cost: u32) -> Result<String, HashError> {
        let plaintext = self.secret.expose_owned();
        let outcome =
            tokio::task::spawn_blocking(move || bcrypt::hash(plaintext.as_bytes(), cost)).await;

        settle(outcome).inspect_err(|e| log::error!("failed to hash password: {}", e))
    }

    /// Hashes the password, turning any failure into a fatal error.
    pub async fn must_hash(&self) -> Result<String, WrappedError> {
        self.must_hash_with_cost(HASH_COST).await
    }

    pub async fn must_hash_with_cost(&self, cost: u32) -> Result<String, WrappedError> {
        self.hash_with_cost(cost)
            .await
            .map_err(WrappedError::map_wrap("failed to hash password"))
    }

    /// Checks this plaintext against a stored bcrypt hash.
    pub async fn compare(&self, encrypted: &str) -> Result<bool, HashError> {
        let plaintext = self.secret.expose_owned();
        let encrypted = encrypted.to_string();
        let outcome =
            tokio::task::spawn_blocking(move || bcrypt::verify(plaintext.as_bytes(), &encrypted))
                .await;

        settle(outcome).inspect_err(|e| log::error!("failed to compare password: {}", e))
    }

    /// Compares against a stored hash, turning a failed comparison (not a
    /// mismatch) into a fatal error.
    pub async fn must_compare(&self, encrypted: &str) -> Result<bool, WrappedError> {
        self.compare(encrypted)
            .await
            .map_err(WrappedError::map_wrap("failed to compare password"))
    }

    /// Replaces every occurrence of the password in `text`.
    pub fn scrub(&self, text: &str, mode: ScrubMode) -> String {
        self.secret.scrub(text, mode)
    }

    pub fn is_contained_in(&self, text: &str) -> bool {
        self.secret.is_contained_in(text)
    }

    pub fn is_valid(&self) -> bool {
        self.audit().is_ok()
    }

    /// Checks the password against the policy: trimmed, printable, at least
    /// [`MIN_LENGTH`] characters and at most [`MAX_BYTE_LENGTH`] bytes.
    ///
    /// The first failing check wins. Its message never contains the
    /// plaintext: when a validator echoed the value, the message is cut at
    /// its first colon and the remainder is scrubbed.
    pub fn audit(&self) -> Result<(), String> {
        let value = self.plaintext();
        as_trimmed(value)
            .and_then(as_printable_chars)
            .and_then(with_min_length(MIN_LENGTH))
            .and(with_max_byte_length(MAX_BYTE_LENGTH)(value))
            .map(|_| ())
            .map_err(|message| self.redact(message))
    }

    fn redact(&self, message: String) -> String {
        if !self.is_contained_in(&message) {
            return message;
        }

        // Validators separate their description from the echoed input with
        // a colon.
        let description = match message.find(':') {
            Some(idx) => &message[..idx],
            None => message.as_str(),
        };
        self.scrub(description, ScrubMode::Default)
    }
}

fn settle<T>(
    outcome: Result<Result<T, bcrypt::BcryptError>, JoinError>,
) -> Result<T, HashError> {
    Ok(outcome??)
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.secret, f)
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Password::new)
    }
}
