//! Configuration module for Code Museum.

use serde::Deserialize;
use std::path::Path;

use crate::{MuseumError, Result};

/// API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path, or a `postgres://` URL when built with the postgres feature.
    #[serde(default = "default_db_url")]
    pub url: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_url() -> String {
    "data/museum.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Web API behaviour.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WebConfig {
    /// CORS allowed origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Accept likes without an acting user (legacy route behaviour).
    #[serde(default)]
    pub anonymous_likes: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/museum.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API server.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Path of the local store holding the remembered identity.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    /// Timezone for displaying dates (e.g., "UTC", "Europe/Berlin").
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_storage_path() -> String {
    "data/local_storage.json".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            storage_path: default_storage_path(),
            timezone: default_timezone(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// API server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Client configuration.
    #[serde(default)]
    pub client: ClientConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(MuseumError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| MuseumError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `PORT`: API server port
    /// - `DATABASE_URL`: database path or URL
    /// - `CLIENT_URL`: single allowed CORS origin
    /// - `MUSEUM_API_URL`: API base URL used by the client
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = get("PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!("Ignoring invalid PORT value {port:?}: {e}"),
            }
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(origin) = get("CLIENT_URL") {
            self.web.cors_origins = vec![origin];
        }
        if let Some(api_url) = get("MUSEUM_API_URL") {
            self.client.api_url = api_url;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(MuseumError::Config("database.url must not be empty".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(MuseumError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        url::Url::parse(&self.client.api_url).map_err(|e| {
            MuseumError::Config(format!("client.api_url {:?} is invalid: {e}", self.client.api_url))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, "data/museum.db");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.web.cors_origins.is_empty());
        assert!(!config.web.anonymous_likes);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/museum.log");
        assert_eq!(config.client.api_url, "http://localhost:5000");
        assert_eq!(config.client.storage_path, "data/local_storage.json");
        assert_eq!(config.client.timezone, "UTC");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[database]
url = "custom/museum.sqlite"
max_connections = 10

[web]
cors_origins = ["http://localhost:5173"]
anonymous_likes = true

[logging]
level = "debug"
file = "custom/logs/app.log"

[client]
api_url = "http://museum.example:8080"
storage_path = "custom/storage.json"
timezone = "Asia/Tokyo"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "custom/museum.sqlite");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.web.cors_origins, vec!["http://localhost:5173"]);
        assert!(config.web.anonymous_likes);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
        assert_eq!(config.client.api_url, "http://museum.example:8080");
        assert_eq!(config.client.storage_path, "custom/storage.json");
        assert_eq!(config.client.timezone, "Asia/Tokyo");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 3000
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "data/museum.db");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(MuseumError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_sample_config_parses() {
        let config = Config::parse(include_str!("../config.toml")).unwrap();
        assert_eq!(config.server.port, 5000);
        assert!(!config.web.anonymous_likes);
        config.validate().unwrap();
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(MuseumError::Io(_))));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("PORT", "7000"),
            ("DATABASE_URL", "override.db"),
            ("CLIENT_URL", "https://museum.example"),
            ("MUSEUM_API_URL", "https://api.museum.example"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides_from(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.database.url, "override.db");
        assert_eq!(config.web.cors_origins, vec!["https://museum.example"]);
        assert_eq!(config.client.api_url, "https://api.museum.example");
    }

    #[test]
    fn test_overrides_ignore_empty_and_invalid() {
        let vars: HashMap<&str, &str> = [("PORT", "not-a-port"), ("DATABASE_URL", "  ")]
            .into_iter()
            .collect();

        let mut config = Config::default();
        config.apply_overrides_from(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, "data/museum.db");
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.database.url = String::new();
        assert!(matches!(config.validate(), Err(MuseumError::Config(_))));

        let mut config = Config::default();
        config.client.api_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(MuseumError::Config(_))));

        let mut config = Config::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }
}
