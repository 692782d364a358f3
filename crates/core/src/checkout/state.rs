//! Checkout states and step outcomes.

use std::fmt;

/// Where the checkout flow currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutState {
    /// Nothing in flight.
    #[default]
    Idle,

    /// Redirected to login with a handoff; waiting for the user to sign in.
    AwaitingAuth,

    /// Purchase submitted, waiting for confirmation.
    Processing,

    /// Purchase confirmed, showing the success message.
    Purchased,
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::AwaitingAuth => "awaiting-auth",
            Self::Processing => "processing",
            Self::Purchased => "purchased",
        })
    }
}

/// Result of a checkout attempt that was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutAttempt {
    /// Signed in; the purchase can be processed.
    Processing,

    /// Anonymous; the user was sent to login with the cart attached.
    RedirectedToLogin,
}

/// What the login destination did after authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCompletion {
    /// Cart lines were restored and the cart reopened at `path`.
    CartRestored {
        /// Lines taken from the handoff.
        restored: usize,

        /// Origin the user was returned to.
        path: String,
    },

    /// Returned to the origin of a handoff that carried no cart lines.
    Returned {
        /// Origin the user was returned to.
        path: String,
    },

    /// No handoff; went to the dashboard.
    Dashboard,
}
