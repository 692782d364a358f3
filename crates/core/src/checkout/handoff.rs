//! Pending checkout handoff.

use crate::{cart::LineItem, navigation::Location};

/// Cart contents carried across the redirect to login.
///
/// Travels only as navigation state; it is never written to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCheckoutHandoff {
    /// Where to send the user once they are signed in.
    pub from: Location,

    /// Cart lines at the moment checkout was attempted.
    pub cart_items: Vec<LineItem>,
}

impl PendingCheckoutHandoff {
    /// Handoff returning to `path` with a snapshot of `cart_items`.
    pub fn new(path: &str, cart_items: Vec<LineItem>) -> Self {
        Self {
            from: Location::new(path),
            cart_items,
        }
    }

    /// Handoff returning to `path` with no cart contents.
    pub fn return_to(path: &str) -> Self {
        Self::new(path, Vec::new())
    }

    /// Whether cart contents need restoring.
    pub fn has_cart_items(&self) -> bool {
        !self.cart_items.is_empty()
    }
}
