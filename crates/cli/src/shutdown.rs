//! Ctrl+C handling

use std::io;

use thiserror::Error;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),
}

/// Cancel `cancel` on Ctrl+C. Returns early once `cancel` fires for any other
/// reason.
pub(crate) async fn listen(cancel: CancellationToken) -> Result<(), ShutdownSignalError> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::CtrlC)?;

            info!("ctrl_c signal received");

            cancel.cancel();
        }
        () = cancel.cancelled() => {}
    }

    Ok(())
}
