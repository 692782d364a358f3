//! Auth service errors.

use thiserror::Error;

use crate::session::SessionStoreError;

/// Failures persisting or restoring the session identity.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Identity could not be encoded as JSON.
    #[error("identity could not be serialised")]
    Serialize(#[source] serde_json::Error),

    /// Session storage failed.
    #[error("session storage error")]
    Storage(#[from] SessionStoreError),
}

/// Login form problems shown inline next to the form.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email or password left empty.
    #[error("Please fill in all fields")]
    MissingFields,

    /// Email has no `@`.
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Reasons a sign-in attempt is refused. Display strings are user facing.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Form failed validation.
    #[error(transparent)]
    Validation(#[from] LoginValidationError),

    /// Credentials do not match the account.
    #[error("Invalid email or password. Use demo credentials to test.")]
    InvalidCredentials,

    /// Identity could not be stored.
    #[error("Login failed. Please try again.")]
    Auth(#[from] AuthServiceError),
}
