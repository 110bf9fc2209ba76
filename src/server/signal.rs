// Signal handling module
//
// - SIGTERM: graceful shutdown
// - SIGINT:  graceful shutdown (Ctrl+C)
// Non-Unix targets only get Ctrl+C.

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Spawn a task that notifies `shutdown` once a termination signal arrives.
///
/// `notify_one` stores a permit, so a signal received while the accept loop
/// is busy is not lost.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    logger::log_error(&format!("Failed to register signal handlers: {e}"));
                    wait_for_ctrl_c(shutdown).await;
                    return;
                }
            };

        let name = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };
        logger::log_info(&format!("{name} received, shutting down gracefully"));
        shutdown.notify_one();
    });
}

#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(wait_for_ctrl_c(shutdown));
}

async fn wait_for_ctrl_c(shutdown: Arc<Notify>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            logger::log_info("Ctrl+C received, shutting down gracefully");
            shutdown.notify_one();
        }
        Err(e) => logger::log_error(&format!("Failed to listen for Ctrl+C: {e}")),
    }
}
