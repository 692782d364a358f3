//! Checkout errors.

use thiserror::Error;

use crate::{
    catalog::PriceError,
    checkout::{CheckoutState, GatewayError},
};

/// Reasons a checkout attempt is turned away without any transition.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CheckoutRejection {
    /// Nothing to buy.
    #[error("cart is empty")]
    EmptyCart,

    /// Stored session not restored yet.
    #[error("authentication state is still loading")]
    AuthLoading,

    /// A purchase is in flight.
    #[error("a purchase is already being processed")]
    AlreadyProcessing,

    /// Success message still showing.
    #[error("the previous purchase has not been dismissed")]
    AwaitingAcknowledgement,
}

/// Failures of the processing, completion and login-return steps.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Step invoked from the wrong state.
    #[error("checkout is {actual}, expected {expected}")]
    InvalidState {
        /// State the step needs.
        expected: CheckoutState,

        /// State the coordinator was in.
        actual: CheckoutState,
    },

    /// Step needs a signed-in user.
    #[error("not signed in")]
    NotAuthenticated,

    /// Cart total could not be computed.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Purchase backend refused or failed.
    #[error("purchase failed")]
    Gateway(#[source] GatewayError),

    /// Purchase abandoned before the backend answered.
    #[error("purchase cancelled")]
    Cancelled,
}
