//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::backend::SupabaseConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hosted backend (Supabase) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Project URL. Empty runs the server on in-memory demo data.
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub anon_key: String,

    #[serde(default = "default_table")]
    pub table: String,

    /// Session token of the user the dashboard acts for
    pub access_token: Option<String>,

    #[serde(default = "default_backend_timeout")]
    pub request_timeout_ms: u64,
}

fn default_table() -> String {
    "registered_trackies".to_string()
}

fn default_backend_timeout() -> u64 {
    5000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            table: default_table(),
            access_token: None,
            request_timeout_ms: default_backend_timeout(),
        }
    }
}

impl BackendConfig {
    /// Whether a real backend has been configured
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Connection settings for the Supabase client
    pub fn supabase(&self) -> SupabaseConfig {
        SupabaseConfig {
            url: self.url.clone(),
            anon_key: self.anon_key.clone(),
            table: self.table.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Requests running longer than this are answered with 408
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Whether structured JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn filter_directive(&self) -> String {
        format!("trackie={},tower_http={}", self.level, self.level)
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from `TRACKIE_CONFIG`, default locations, or environment
    pub fn load_default() -> Self {
        let explicit = std::env::var("TRACKIE_CONFIG").ok().map(PathBuf::from);
        let config_paths = [
            explicit,
            dirs::config_dir().map(|p| p.join("trackie").join("config.toml")),
            Some(PathBuf::from("./trackie.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Backend overrides
        if let Some(url) = lookup("TRACKIE_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Some(key) = lookup("TRACKIE_ANON_KEY") {
            self.backend.anon_key = key;
        }
        if let Some(token) = lookup("TRACKIE_ACCESS_TOKEN") {
            self.backend.access_token = Some(token);
        }

        // API overrides
        if let Some(host) = lookup("TRACKIE_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("TRACKIE_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("TRACKIE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("TRACKIE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Trackie Configuration
#
# Environment variables override these settings:
# - TRACKIE_BACKEND_URL
# - TRACKIE_ANON_KEY
# - TRACKIE_ACCESS_TOKEN
# - TRACKIE_API_HOST
# - TRACKIE_API_PORT
# - TRACKIE_LOG_LEVEL
# - TRACKIE_LOG_FORMAT

[backend]
# Supabase project URL. Leave empty to serve in-memory demo data.
url = ""

# Public anon key of the project
anon_key = ""

# Table with one row per registered user
table = "registered_trackies"

# Session token of the signed-in user (optional)
# access_token = ""

# Request timeout in milliseconds
request_timeout_ms = 5000

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

# Allowed CORS origins (empty allows any origin)
cors_origins = ["http://localhost:5173", "http://127.0.0.1:5173"]

# Requests running longer than this many seconds are answered with 408
request_timeout_secs = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
