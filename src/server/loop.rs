// Server loop module
// Accepts connections until shutdown is requested, then drains active ones

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the accept loop on the current `LocalSet`.
///
/// Accept errors are logged and the loop keeps going; only `shutdown`
/// ends it. After that the listener is closed and active connections get
/// `performance.shutdown_grace_period` seconds to finish.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    active_connections: Arc<AtomicUsize>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            _ = shutdown.notified() => break,
        }
    }

    drop(listener);

    let grace = state.config.performance.shutdown_grace_period;
    logger::log_shutdown_started(active_connections.load(Ordering::SeqCst), grace);
    let remaining = wait_for_drain(&active_connections, Duration::from_secs(grace)).await;
    logger::log_shutdown_complete(remaining);

    Ok(())
}

/// Wait until the counter hits zero or `grace` elapses; returns what is left
async fn wait_for_drain(active_connections: &AtomicUsize, grace: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + grace;
    loop {
        let active = active_connections.load(Ordering::SeqCst);
        if active == 0 || tokio::time::Instant::now() >= deadline {
            return active;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppState, Config};
    use crate::handler::Endpoint;
    use crate::server::create_reusable_listener;

    #[tokio::test]
    async fn test_drain_returns_immediately_when_idle() {
        let counter = AtomicUsize::new(0);
        assert_eq!(wait_for_drain(&counter, Duration::from_secs(60)).await, 0);
    }

    #[tokio::test]
    async fn test_drain_gives_up_after_grace() {
        let counter = AtomicUsize::new(2);
        assert_eq!(wait_for_drain(&counter, Duration::from_millis(120)).await, 2);
    }

    #[tokio::test]
    async fn test_loop_stops_on_shutdown() {
        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let state = Arc::new(AppState::new(&Config::default(), Endpoint::Calculator));
        let shutdown = Arc::new(Notify::new());
        // A stored permit makes the first `notified()` complete at once
        shutdown.notify_one();

        let local = tokio::task::LocalSet::new();
        let result = local
            .run_until(start_server_loop(
                listener,
                state,
                Arc::new(AtomicUsize::new(0)),
                shutdown,
            ))
            .await;
        assert!(result.is_ok());
    }
}
