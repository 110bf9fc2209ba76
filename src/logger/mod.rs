//! Logger module
//!
//! Logging utilities for the HTTP server:
//! - Server lifecycle logging
//! - Access logging in several formats
//! - Error and warning logging
//! - Optional file-based sinks

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use crate::handler::Endpoint;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, endpoint: Endpoint, config: &Config) {
    write_info("======================================");
    write_info(&format!("{} server started", endpoint.name()));
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Usage: {}", endpoint.example()));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(max_conn) = config.performance.max_connections {
        write_info(&format!("Max connections: {max_conn}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================");
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_shutdown_started(active: usize, grace_secs: u64) {
    write_info(&format!(
        "[Shutdown] Stopped accepting connections, waiting up to {grace_secs}s for {active} active"
    ));
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        write_info("[Shutdown] All connections closed, bye");
    } else {
        write_error(&format!(
            "[WARN] [Shutdown] Grace period elapsed with {remaining} connection(s) still open"
        ));
    }
}
