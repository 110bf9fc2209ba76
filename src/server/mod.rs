// Server module entry point
// Process startup, connection handling and graceful shutdown

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file is mounted under another name
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_reusable_listener;
pub use server_loop::start_server_loop;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::config::{self, Config};
use crate::handler::Endpoint;
use crate::logger;

/// Load configuration, build the runtime and serve `endpoint` until a
/// termination signal arrives.
///
/// The first command-line argument, if any, names the config file
/// (without extension).
pub fn run(endpoint: Endpoint) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, endpoint))
}

async fn async_main(cfg: Config, endpoint: Endpoint) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = create_reusable_listener(addr)?;

    let state = Arc::new(config::AppState::new(&cfg, endpoint));
    let active_connections = Arc::new(AtomicUsize::new(0));
    let shutdown = Arc::new(Notify::new());

    logger::log_server_start(&addr, endpoint, &cfg);
    signal::start_signal_handler(Arc::clone(&shutdown));

    // Connections are spawned with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(start_server_loop(listener, state, active_connections, shutdown))
        .await
}
