// Configuration module entry point
// Loads layered configuration and holds per-process runtime state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

use types::{
    DEFAULT_ACCESS_LOG_FORMAT, DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PORT,
    DEFAULT_READ_TIMEOUT, DEFAULT_SERVER_NAME, DEFAULT_SHUTDOWN_GRACE_PERIOD,
    DEFAULT_WRITE_TIMEOUT,
};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable overriding `server.port`
pub const PORT_ENV: &str = "PORT";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Layers, lowest precedence first: defaults, the optional file,
    /// `CALC_*` environment variables, then `PORT`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_port(config_path, std::env::var(PORT_ENV).ok().as_deref())
    }

    pub fn load_with_port(
        config_path: &str,
        port_override: Option<&str>,
    ) -> Result<Self, config::ConfigError> {
        let port = port_override.map(parse_port).transpose()?;

        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CALC")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", DEFAULT_ACCESS_LOG_FORMAT)?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.read_timeout", DEFAULT_READ_TIMEOUT)?
            .set_default("performance.write_timeout", DEFAULT_WRITE_TIMEOUT)?
            .set_default(
                "performance.shutdown_grace_period",
                DEFAULT_SHUTDOWN_GRACE_PERIOD,
            )?
            .set_default("http.server_name", DEFAULT_SERVER_NAME)?
            .set_override_option("server.port", port.map(i64::from))?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

fn parse_port(raw: &str) -> Result<u16, config::ConfigError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|e| config::ConfigError::Message(format!("Invalid {PORT_ENV} value '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING_FILE: &str = "does-not-exist/calculator-config";

    #[test]
    fn test_defaults() {
        let cfg = Config::load_with_port(MISSING_FILE, None).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 5000);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.performance.shutdown_grace_period, 5);
        assert_eq!(cfg.get_socket_addr().unwrap().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn test_port_override() {
        let cfg = Config::load_with_port(MISSING_FILE, Some("8081")).unwrap();
        assert_eq!(cfg.server.port, 8081);
    }

    #[test]
    fn test_invalid_port() {
        assert!(Config::load_with_port(MISSING_FILE, Some("abc")).is_err());
        assert!(Config::load_with_port(MISSING_FILE, Some("70000")).is_err());
    }

    /// Write `contents` to a fresh `config.toml` and return its path
    fn write_config_file(test_name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "calc-config-{test_name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_file_layer_and_port_precedence() {
        let path = write_config_file(
            "file",
            "[server]\nport = 7000\nworkers = 2\n\n[http]\nserver_name = \"calc-test\"\n",
        );
        let path_str = path.to_str().unwrap();

        let cfg = Config::load_with_port(path_str, None).unwrap();
        assert_eq!(cfg.server.port, 7000);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.http.server_name, "calc-test");
        // Keys missing from the file keep their defaults
        assert_eq!(cfg.server.host, "0.0.0.0");

        let cfg = Config::load_with_port(path_str, Some("9000")).unwrap();
        assert_eq!(cfg.server.port, 9000);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_env_layer_outranks_file() {
        let path = write_config_file(
            "env",
            "[performance]\nread_timeout = 10\nwrite_timeout = 12\n",
        );
        let path_str = path.to_str().unwrap();

        std::env::set_var("CALC_PERFORMANCE__READ_TIMEOUT", "45");
        let result = Config::load_with_port(path_str, None);
        std::env::remove_var("CALC_PERFORMANCE__READ_TIMEOUT");

        let cfg = result.unwrap();
        assert_eq!(cfg.performance.read_timeout, 45);
        assert_eq!(cfg.performance.write_timeout, 12);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_host() {
        let mut cfg = Config::default();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
