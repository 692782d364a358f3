//! Checkout
//!
//! The checkout state machine, the login handoff that carries a cart across the
//! redirect, and the purchase backend seam.

mod coordinator;
mod errors;
mod gateway;
mod handoff;
mod state;

pub use coordinator::{CheckoutCoordinator, DEFAULT_CONFIRMATION_DELAY};
pub use errors::{CheckoutError, CheckoutRejection};
pub use gateway::{
    DEFAULT_PROCESSING_DELAY, GatewayError, MockPurchaseGateway, PurchaseConfirmation,
    PurchaseGateway, PurchaseRequest, SimulatedGateway,
};
pub use handoff::PendingCheckoutHandoff;
pub use state::{AuthCompletion, CheckoutAttempt, CheckoutState};
