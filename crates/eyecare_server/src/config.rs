//! Server configuration loaded from environment variables.
//!
//! Variables may come from a `.env` file; real environment values win.

use eyecare_core::default_log_level;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
pub const DEFAULT_DB_PATH: &str = "eyecare.sqlite3";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
pub const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has invalid value `{value}`: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("cannot resolve working directory for default log dir: {0}")]
    WorkingDir(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    pub reminder_interval: Duration,
    /// Allowed CORS origin for the browser client.
    pub frontend_url: String,
}

impl ServerConfig {
    /// Loads `.env` (when present) and reads `EYECARE_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env is the normal production case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw =
            lookup("EYECARE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|err: std::net::AddrParseError| {
            ConfigError::Invalid {
                name: "EYECARE_BIND_ADDR",
                value: bind_raw.clone(),
                reason: err.to_string(),
            }
        })?;

        let interval_secs = match lookup("EYECARE_REMINDER_INTERVAL_SECS") {
            Some(raw) => parse_interval(&raw)?,
            None => DEFAULT_REMINDER_INTERVAL_SECS,
        };

        let log_dir = match lookup("EYECARE_LOG_DIR") {
            Some(raw) => PathBuf::from(raw),
            None => std::env::current_dir()?.join("logs"),
        };

        Ok(Self {
            bind_addr,
            db_path: lookup("EYECARE_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            log_level: lookup("EYECARE_LOG_LEVEL")
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir,
            reminder_interval: Duration::from_secs(interval_secs),
            frontend_url: lookup("EYECARE_FRONTEND_URL")
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
        })
    }
}

fn parse_interval(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        name: "EYECARE_REMINDER_INTERVAL_SECS",
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("expected a whole number of seconds"))?;
    if secs == 0 {
        return Err(invalid("must be greater than zero"));
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ServerConfig, DEFAULT_REMINDER_INTERVAL_SECS};
    use std::collections::HashMap;
    use std::time::Duration;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr.port(), 3001);
        assert_eq!(
            config.reminder_interval,
            Duration::from_secs(DEFAULT_REMINDER_INTERVAL_SECS)
        );
        assert!(config.log_dir.is_absolute());
        assert_eq!(config.frontend_url, "http://localhost:5173");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config(&[
            ("EYECARE_BIND_ADDR", "127.0.0.1:8080"),
            ("EYECARE_DB_PATH", "/var/lib/eyecare/db.sqlite3"),
            ("EYECARE_LOG_LEVEL", "warn"),
            ("EYECARE_LOG_DIR", "/var/log/eyecare"),
            ("EYECARE_REMINDER_INTERVAL_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.reminder_interval, Duration::from_secs(30));
    }

    #[test]
    fn rejects_zero_interval() {
        let err = config(&[("EYECARE_REMINDER_INTERVAL_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn rejects_bad_bind_addr() {
        let err = config(&[("EYECARE_BIND_ADDR", "localhost")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "EYECARE_BIND_ADDR",
                ..
            }
        ));
    }
}
