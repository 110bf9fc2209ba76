//! HTTP response building module
//!
//! Builders for the handful of responses the service produces, decoupled from
//! the endpoint logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

pub const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

const HTML: &str = "text/html; charset=utf-8";
const PLAIN: &str = "text/plain; charset=utf-8";

/// Build 200 response with an HTML body (empty body for HEAD)
pub fn build_html_response(content: String, server_name: &str, is_head: bool) -> Response<Full<Bytes>> {
    build_body_response(StatusCode::OK, HTML, content, server_name, is_head)
}

/// Build 200 response with a plain-text body (empty body for HEAD)
pub fn build_text_response(content: String, server_name: &str, is_head: bool) -> Response<Full<Bytes>> {
    build_body_response(StatusCode::OK, PLAIN, content, server_name, is_head)
}

/// Build 404 Not Found response
pub fn build_404_response(server_name: &str, is_head: bool) -> Response<Full<Bytes>> {
    build_body_response(
        StatusCode::NOT_FOUND,
        PLAIN,
        "404 Not Found".to_string(),
        server_name,
        is_head,
    )
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(server_name: &str) -> Response<Full<Bytes>> {
    let body = "405 Method Not Allowed";
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", PLAIN)
        .header("Content-Length", body.len())
        .header("Allow", ALLOWED_METHODS)
        .header("Server", server_name)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from(body)))
        })
}

/// Build OPTIONS response
pub fn build_options_response(server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOWED_METHODS)
        .header("Server", server_name)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn build_body_response(
    status: StatusCode,
    content_type: &str,
    content: String,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Server", server_name)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
