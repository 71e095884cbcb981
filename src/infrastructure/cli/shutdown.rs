//! Process shutdown: signal handling and the farewell line

use std::process::ExitCode;

use tokio::signal;

/// Why the game is ending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The session ended through `.quit` or the player's death
    GameOver,
    /// SIGINT or SIGTERM
    Signal,
    /// Initialisation or IO failure
    Error,
}

impl ShutdownReason {
    pub fn notice(&self) -> &'static str {
        match self {
            Self::GameOver | Self::Signal => "\nShutting down...",
            Self::Error => "\nShutting down... due to error.",
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::GameOver | Self::Signal => ExitCode::SUCCESS,
            Self::Error => ExitCode::FAILURE,
        }
    }
}

/// Completes when the process receives Ctrl+C or, on Unix, SIGTERM.
///
/// A handler that cannot be installed never fires.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C"),
        () = terminate => tracing::info!("Received SIGTERM"),
    }
}
