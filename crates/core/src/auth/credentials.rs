//! Login form input and the demo account.

use std::fmt;

use zeroize::Zeroize;

use crate::auth::{Identity, LoginValidationError};

/// Email of the demo account.
pub const DEMO_EMAIL: &str = "demo@orchid.com";

/// Password of the demo account.
pub const DEMO_PASSWORD: &str = "demo123";

/// Raw values typed into the login form.
#[derive(Clone)]
pub struct LoginForm {
    /// Email address as entered.
    pub email: String,

    password: String,
}

impl LoginForm {
    /// Capture form input.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Password as entered.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Check the form before any sign-in attempt.
    ///
    /// # Errors
    ///
    /// Returns [`LoginValidationError::MissingFields`] when either field is empty and
    /// [`LoginValidationError::InvalidEmail`] when the email has no `@`.
    pub fn validate(&self) -> Result<(), LoginValidationError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(LoginValidationError::MissingFields);
        }

        if !self.email.contains('@') {
            return Err(LoginValidationError::InvalidEmail);
        }

        Ok(())
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl Drop for LoginForm {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// The one account the storefront accepts.
#[derive(Clone)]
pub struct DemoAccount {
    email: String,
    password: String,
    identity: Identity,
}

impl DemoAccount {
    /// Create an account with the given credentials and profile.
    pub fn new(email: impl Into<String>, password: impl Into<String>, identity: Identity) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            identity,
        }
    }

    /// Email address of the account.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Profile adopted on successful sign-in.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Whether the form carries this account's credentials. The email ignores ASCII
    /// case; the password must match exactly.
    pub fn matches(&self, form: &LoginForm) -> bool {
        form.email.eq_ignore_ascii_case(&self.email) && form.password() == self.password
    }
}

impl Default for DemoAccount {
    fn default() -> Self {
        Self::new(
            DEMO_EMAIL,
            DEMO_PASSWORD,
            Identity {
                id: "1".to_string(),
                name: "Alex Johnson".to_string(),
                email: DEMO_EMAIL.to_string(),
                avatar: Some(crate::auth::DEFAULT_AVATAR.to_string()),
            },
        )
    }
}

impl fmt::Debug for DemoAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoAccount")
            .field("email", &self.email)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl Drop for DemoAccount {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}
