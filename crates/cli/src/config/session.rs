//! Session Config

use std::path::PathBuf;

use clap::Args;

/// Session storage settings.
#[derive(Debug, Args)]
pub(crate) struct SessionConfig {
    /// File holding the signed-in identity between invocations
    #[arg(
        long,
        env = "ORCHID_SESSION_FILE",
        default_value = ".orchid/session.json",
        global = true
    )]
    pub session_file: PathBuf,
}
