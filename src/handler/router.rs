//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, path check,
//! endpoint dispatch and access logging.

use crate::config::AppState;
use crate::handler::query::QueryParams;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
#[allow(clippy::unused_async)]
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let response = route_request(&req, &state);

    if state.config.logging.access_log {
        log_access(
            &req,
            &response,
            peer_addr,
            started,
            &state.config.logging.access_log_format,
        );
    }

    Ok(response)
}

fn route_request<B>(req: &Request<B>, state: &AppState) -> Response<Full<Bytes>> {
    let server_name = state.config.http.server_name.as_str();
    let method = req.method();
    let is_head = *method == Method::HEAD;

    if req.uri().path() != "/" {
        return http::build_404_response(server_name, is_head);
    }

    match *method {
        Method::GET | Method::HEAD => {}
        Method::OPTIONS => return http::build_options_response(server_name),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            return http::build_405_response(server_name);
        }
    }

    let params = QueryParams::parse(req.uri().query());
    let body = state.endpoint.respond(&params);

    if state.endpoint.is_html() {
        http::build_html_response(body, server_name, is_head)
    } else {
        http::build_text_response(body, server_name, is_head)
    }
}

fn log_access<B>(
    req: &Request<B>,
    resp: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    format: &str,
) {
    let mut entry = AccessLogEntry::new(
        peer_addr.to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = format_version(req.version()).to_string();
    entry.status = resp.status().as_u16();
    entry.body_bytes = resp
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    entry.user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, format);
}

fn format_version(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
