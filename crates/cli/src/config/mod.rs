//! CLI configuration

use std::path::PathBuf;

use clap::Args;

use crate::config::{logging::LoggingConfig, session::SessionConfig, timing::TimingConfig};

pub(crate) mod logging;
pub(crate) mod session;
pub(crate) mod timing;

/// Settings shared by every command.
#[derive(Debug, Args)]
pub(crate) struct Config {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Session storage settings.
    #[command(flatten)]
    pub session: SessionConfig,

    /// Simulated delays.
    #[command(flatten)]
    pub timing: TimingConfig,

    /// Catalog fixture to use instead of the bundled demo catalog
    #[arg(long, env = "ORCHID_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,
}
