//! Orchid
//!
//! Orchid is the storefront core of a course marketplace: authentication with a
//! session-persisted identity, an in-memory cart, and a checkout flow that
//! carries the cart across a login redirect and restores it afterwards.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod learning;
pub mod navigation;
pub mod prelude;
pub mod receipt;
pub mod session;
pub mod storefront;
