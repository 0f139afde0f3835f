pub mod password;
pub mod secret;

use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::error::AppError;
use crate::validation::as_trimmed;

// Re-export necessary items
pub use password::{HashError, Password, HASH_COST, MAX_BYTE_LENGTH, MIN_LENGTH};
pub use secret::{ScrubMode, Secret, MASK};

/// Represents the payload for a new user registration request.
///
/// The password is audited at the struct level: its policy error is
/// reported under `__all__` with code `password_policy` and carries no
/// `value` param.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "audit_password", skip_on_field_errors = false))]
pub struct SignUpRequest {
    /// Email address for the new account.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// Must pass `Password::audit`.
    pub password: Password,
    #[validate(length(min = 1, max = 64), custom = "trimmed_name")]
    pub first_name: String,
    #[validate(length(min = 1, max = 64), custom = "trimmed_name")]
    pub last_name: String,
}

/// Represents the payload for a user login request.
///
/// The password is not audited here: it is only ever compared against the
/// stored hash, so older passwords keep working if the policy tightens.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    pub password: Password,
}

/// A validated registration, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// bcrypt hash of the password; the plaintext is gone by now.
    pub password_hash: String,
}

impl SignUpRequest {
    /// Validates the request and hashes its password at `cost`.
    pub async fn into_new_user(self, cost: u32) -> Result<NewUser, AppError> {
        self.validate()?;

        let password_hash = self.password.must_hash_with_cost(cost).await?;
        log::debug!("prepared credentials for {}", self.email);

        Ok(NewUser {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password_hash,
        })
    }
}

impl LoginRequest {
    /// Validates the request and checks its password against the stored
    /// hash. `Ok(false)` means the credentials are wrong.
    pub async fn verify(&self, password_hash: &str) -> Result<bool, AppError> {
        self.validate()?;

        let matches = self.password.must_compare(password_hash).await?;
        if !matches {
            log::info!("password mismatch for {}", self.email);
        }
        Ok(matches)
    }
}

fn validation_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));
    error
}

fn audit_password(request: &SignUpRequest) -> Result<(), ValidationError> {
    request.password.audit().map_err(|message| {
        log::warn!("rejected password: {}", message);
        validation_error("password_policy", message)
    })
}

fn trimmed_name(name: &str) -> Result<(), ValidationError> {
    as_trimmed(name)
        .map(|_| ())
        .map_err(|message| validation_error("untrimmed", message))
}
