use std::env;

use serde::Deserialize;

/// Top-level chainrecord.toml configuration
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_hostname")]
    pub hostname: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sled,
    Memory,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LogConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Json,
}

// ── Default value functions ──────────────────────────

fn default_port() -> u16 {
    7051
}

fn default_hostname() -> String {
    "127.0.0.1".to_string()
}

fn default_backend() -> StorageBackend {
    StorageBackend::Sled
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            hostname: default_hostname(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults if the file
    /// doesn't exist or cannot be parsed.
    ///
    /// Runs before logging is set up, so warnings go straight to stderr.
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                eprintln!("Warning: failed to parse {}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // CHAINRECORD_STORAGE
        if let Some(val) = var("CHAINRECORD_STORAGE") {
            match val.to_lowercase().as_str() {
                "sled" => self.storage.backend = StorageBackend::Sled,
                "memory" => self.storage.backend = StorageBackend::Memory,
                other => eprintln!("Warning: unknown CHAINRECORD_STORAGE value: {}", other),
            }
        }

        // CHAINRECORD_DATA_DIR
        if let Some(val) = var("CHAINRECORD_DATA_DIR") {
            if !val.trim().is_empty() {
                self.storage.data_dir = val;
            }
        }

        // CHAINRECORD_PORT
        if let Some(val) = var("CHAINRECORD_PORT") {
            match val.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => eprintln!("Warning: invalid CHAINRECORD_PORT value: {}", val),
            }
        }

        // CHAINRECORD_LOG_FORMAT
        if let Some(val) = var("CHAINRECORD_LOG_FORMAT") {
            match val.to_lowercase().as_str() {
                "compact" => self.log.format = LogFormat::Compact,
                "json" => self.log.format = LogFormat::Json,
                other => eprintln!("Warning: unknown CHAINRECORD_LOG_FORMAT value: {}", other),
            }
        }
    }
}
