//! Timing Config

use std::time::Duration;

use clap::Args;
use orchid::storefront::StorefrontConfig;

/// Simulated delays, in milliseconds.
#[derive(Debug, Args)]
pub(crate) struct TimingConfig {
    /// Wait before the stored session is restored
    #[arg(long, env = "ORCHID_RESTORE_DELAY_MS", default_value_t = 500, global = true)]
    pub restore_delay_ms: u64,

    /// Wait before submitted credentials are checked
    #[arg(long, env = "ORCHID_SIGN_IN_LATENCY_MS", default_value_t = 1000, global = true)]
    pub sign_in_latency_ms: u64,

    /// Time the simulated backend takes to confirm a purchase
    #[arg(long, env = "ORCHID_PROCESSING_DELAY_MS", default_value_t = 2000, global = true)]
    pub processing_delay_ms: u64,

    /// How long the purchase confirmation stays up
    #[arg(long, env = "ORCHID_CONFIRMATION_DELAY_MS", default_value_t = 2000, global = true)]
    pub confirmation_delay_ms: u64,
}

impl TimingConfig {
    /// Storefront timings.
    pub(crate) fn storefront(&self) -> StorefrontConfig {
        StorefrontConfig {
            restore_delay: Duration::from_millis(self.restore_delay_ms),
            sign_in_latency: Duration::from_millis(self.sign_in_latency_ms),
            confirmation_delay: Duration::from_millis(self.confirmation_delay_ms),
        }
    }

    /// Simulated backend latency.
    pub(crate) fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}
