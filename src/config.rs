// Request Logger - runtime configuration
//
// Built once in `main()` and handed to the router through `AppState`.
// Every field has a compiled-in default; environment variables (and a
// `.env` file loaded by the binary) may override them.

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_USERNAME: &str = "itsolutions";
pub const DEFAULT_PASSWORD: &str = "hello";
pub const DEFAULT_LOG_DIR: &str = "request_logs";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Expected Basic auth username.
    pub username: String,
    /// Expected Basic auth password.
    pub password: String,
    /// Directory that receives one JSON file per captured request.
    pub log_dir: PathBuf,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (unset keys keep defaults).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(username) = lookup("CAPTURE_USERNAME") {
            config.username = username;
        }
        if let Some(password) = lookup("CAPTURE_PASSWORD") {
            config.password = password;
        }
        if let Some(dir) = lookup("LOG_DIR").filter(|d| !d.trim().is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }

        Ok(config)
    }

    /// Listen on all interfaces.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Builder helper used by tests and embedders.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_compiled_in_values() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.username, "itsolutions");
        assert_eq!(config.password, "hello");
        assert_eq!(config.log_dir, PathBuf::from("request_logs"));
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("CAPTURE_USERNAME", "alice"),
            ("CAPTURE_PASSWORD", "s3cret"),
            ("LOG_DIR", "/tmp/captures"),
            ("PORT", "9090"),
        ]))
        .unwrap();
        assert_eq!(config.username, "alice");
        assert_eq!(config.password, "s3cret");
        assert_eq!(config.log_dir, PathBuf::from("/tmp/captures"));
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn blank_log_dir_keeps_default() {
        let config = Config::from_lookup(lookup_from(&[("LOG_DIR", "  ")])).unwrap();
        assert_eq!(config.log_dir, PathBuf::from(DEFAULT_LOG_DIR));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref p) if p == "eighty"));
    }
}
