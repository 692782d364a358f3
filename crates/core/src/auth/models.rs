//! Auth data models.

use serde::{Deserialize, Serialize};

/// Avatar assigned to identities created from an email address alone.
pub const DEFAULT_AVATAR: &str = "/api/placeholder/100/100";

/// Id assigned to identities created from an email address alone.
pub const DEFAULT_IDENTITY_ID: &str = "1";

/// Authenticated user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Account id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Sign-in email address.
    pub email: String,

    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Identity {
    /// Derive an identity from an email address; the name is the local part.
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or(email);

        Self {
            id: DEFAULT_IDENTITY_ID.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            avatar: Some(DEFAULT_AVATAR.to_string()),
        }
    }

    /// Up to two uppercase initials for the avatar fallback, or `U` for a blank
    /// name.
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect();

        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }
}

/// Authentication state as observed by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// Stored session not yet restored; neither signed in nor out.
    Loading,

    /// No identity.
    Anonymous,

    /// Signed in.
    Authenticated(Identity),
}

impl AuthStatus {
    /// The current identity, if signed in.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Loading | Self::Anonymous => None,
        }
    }
}
