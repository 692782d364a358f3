//! Purchase backend seam.

use std::time::Duration;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{auth::Identity, cart::LineItem};

/// Default time the simulated backend takes to confirm a purchase.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_secs(2);

/// Purchase submitted to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRequest {
    /// Buyer.
    pub buyer: Identity,

    /// Lines being bought.
    pub items: Vec<LineItem>,

    /// Amount due.
    pub total: Money<'static, Currency>,
}

/// Backend acknowledgement of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseConfirmation {
    /// When the backend accepted the purchase.
    pub confirmed_at: Timestamp,
}

/// Purchase backend failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Backend refused the purchase.
    #[error("payment declined: {0}")]
    Declined(String),

    /// Backend could not be reached.
    #[error("purchase backend unavailable")]
    Unavailable,
}

/// Accepts purchases on behalf of a payment backend.
#[automock]
#[async_trait]
pub trait PurchaseGateway: Send + Sync {
    /// Submit a purchase and wait for the backend's answer.
    async fn submit(
        &self,
        request: &PurchaseRequest,
    ) -> Result<PurchaseConfirmation, GatewayError>;
}

/// Stand-in backend: waits a fixed delay, then answers.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    latency: Duration,
    decline_reason: Option<String>,
}

impl SimulatedGateway {
    /// Backend that confirms every purchase after `latency`.
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            decline_reason: None,
        }
    }

    /// Backend that declines every purchase after `latency`.
    pub fn declining(latency: Duration, reason: impl Into<String>) -> Self {
        Self {
            latency,
            decline_reason: Some(reason.into()),
        }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESSING_DELAY)
    }
}

#[async_trait]
impl PurchaseGateway for SimulatedGateway {
    async fn submit(
        &self,
        request: &PurchaseRequest,
    ) -> Result<PurchaseConfirmation, GatewayError> {
        debug!(
            items = request.items.len(),
            total_minor = request.total.to_minor_units(),
            latency = ?self.latency,
            "simulating purchase"
        );

        tokio::time::sleep(self.latency).await;

        match &self.decline_reason {
            Some(reason) => Err(GatewayError::Declined(reason.clone())),
            None => Ok(PurchaseConfirmation {
                confirmed_at: Timestamp::now(),
            }),
        }
    }
}
