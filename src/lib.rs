//! Arithmetic over HTTP query strings
//!
//! Two small services share this crate: a calculator (`/?op=sumar&a=2&b=3`)
//! and an echo endpoint (`/?a=..&b=..`). Both run on tokio + hyper with
//! layered configuration and a plain stdout/stderr/file logger.

pub mod arithmetic;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use handler::Endpoint;
