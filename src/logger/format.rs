//! Access log format module
//!
//! Supported formats: `combined` (Apache/Nginx), `common` (CLF) and `json`.
//! Unknown format names fall back to `combined`.

use chrono::{DateTime, Local};

const CLF_TIME: &str = "%d/%b/%Y:%H:%M:%S %z";

/// One request/response pair as written to the access log
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: DateTime<Local>,
    pub method: String,
    pub path: String,
    /// Raw query string, without the leading `?`
    pub query: Option<String>,
    pub http_version: String,
    pub status: u16,
    pub body_bytes: usize,
    pub user_agent: Option<String>,
    /// Handling time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            user_agent: None,
            request_time_us: 0,
        }
    }

    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            _ => self.format_combined(),
        }
    }

    fn request_uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", self.path),
            None => self.path.clone(),
        }
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format(CLF_TIME),
            self.method,
            self.request_uri(),
            self.http_version,
            self.status,
            self.body_bytes,
        )
    }

    /// Common format followed by referer (always `-`), user agent and time taken
    fn format_combined(&self) -> String {
        format!(
            "{} \"-\" \"{}\" {:.3}",
            self.format_common(),
            self.user_agent.as_deref().unwrap_or("-"),
            self.request_time_secs(),
        )
    }

    fn format_json(&self) -> String {
        let user_agent = self
            .user_agent
            .as_ref()
            .map_or_else(|| "null".to_string(), |u| format!("\"{}\"", escape_json(u)));
        let query = self
            .query
            .as_ref()
            .map_or_else(|| "null".to_string(), |q| format!("\"{}\"", escape_json(q)));

        format!(
            r#"{{"remote_addr":"{}","time":"{}","method":"{}","path":"{}","query":{},"http_version":"{}","status":{},"body_bytes":{},"user_agent":{},"request_time_us":{}}}"#,
            escape_json(&self.remote_addr),
            self.time.to_rfc3339(),
            escape_json(&self.method),
            escape_json(&self.path),
            query,
            escape_json(&self.http_version),
            self.status,
            self.body_bytes,
            user_agent,
            self.request_time_us,
        )
    }

    #[allow(clippy::cast_precision_loss)]
    fn request_time_secs(&self) -> f64 {
        self.request_time_us as f64 / 1_000_000.0
    }
}

fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "10.0.0.7:51234".to_string(),
            "GET".to_string(),
            "/".to_string(),
        );
        entry.query = Some("op=sumar&a=2&b=3".to_string());
        entry.body_bytes = 64;
        entry.user_agent = Some("curl/8.5.0".to_string());
        entry.request_time_us = 12_000;
        entry
    }

    #[test]
    fn test_format_common() {
        let log = sample_entry().format("common");
        assert!(log.starts_with("10.0.0.7:51234 - - ["));
        assert!(log.contains("\"GET /?op=sumar&a=2&b=3 HTTP/1.1\" 200 64"));
        assert!(!log.contains("curl"));
    }

    #[test]
    fn test_format_combined() {
        let log = sample_entry().format("combined");
        assert!(log.contains("\"GET /?op=sumar&a=2&b=3 HTTP/1.1\" 200 64"));
        assert!(log.ends_with("\"-\" \"curl/8.5.0\" 0.012"));
    }

    #[test]
    fn test_unknown_format_falls_back_to_combined() {
        let entry = sample_entry();
        assert_eq!(entry.format("fancy"), entry.format("combined"));
    }

    #[test]
    fn test_format_json() {
        let mut entry = sample_entry();
        entry.user_agent = Some("quote\"agent".to_string());
        let log = entry.format("json");
        assert!(log.contains(r#""query":"op=sumar&a=2&b=3""#));
        assert!(log.contains(r#""status":200"#));
        assert!(log.contains(r#""user_agent":"quote\"agent""#));
        assert!(log.contains(r#""request_time_us":12000"#));
    }
}
