//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::nav::{CatalogError, LinkCatalog, LinkEntry, DEFAULT_BREAKPOINT_PX};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Session store connection settings
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    #[serde(default = "default_store_host")]
    pub host: String,

    #[serde(default = "default_store_port")]
    pub port: u16,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
}

fn default_store_host() -> String {
    "localhost".to_string()
}

fn default_store_port() -> u16 {
    6379
}

fn default_connect_timeout() -> u64 {
    5000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: default_store_host(),
            port: default_store_port(),
            username: None,
            password: None,
            connect_timeout_ms: default_connect_timeout(),
        }
    }
}

impl StoreConfig {
    /// Defaults with `STORE_*` (or legacy `REDIS_*`) environment overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(host) = env_value(&["STORE_HOST", "REDIS_HOST"]) {
            self.host = host;
        }
        if let Some(port) = env_value(&["STORE_PORT", "REDIS_PORT"]) {
            // An unparsable port falls back to the default rather than failing startup
            self.port = port.parse().unwrap_or_else(|_| {
                tracing::warn!(port = %port, "Invalid store port, using default");
                default_store_port()
            });
        }
        if let Some(username) = env_value(&["STORE_USERNAME", "REDIS_USERNAME"]) {
            self.username = Some(username);
        }
        if let Some(password) = env_value(&["STORE_PASSWORD", "REDIS_PASSWORD"]) {
            self.password = Some(password);
        }
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .finish()
    }
}

/// Header navigation settings
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationConfig {
    /// Viewport width (px) from which the desktop header is used
    #[serde(default = "default_breakpoint")]
    pub breakpoint_px: u32,

    /// Replaces the built-in link list when set
    #[serde(default)]
    pub links: Option<Vec<LinkEntry>>,
}

fn default_breakpoint() -> u32 {
    DEFAULT_BREAKPOINT_PX
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: default_breakpoint(),
            links: None,
        }
    }
}

impl NavigationConfig {
    /// Validated link catalog for the header
    pub fn catalog(&self) -> Result<LinkCatalog, CatalogError> {
        match &self.links {
            Some(links) => LinkCatalog::new(links.clone()),
            None => Ok(LinkCatalog::default()),
        }
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

        config
            .navigation
            .catalog()
            .map_err(|e| ConfigError::Navigation {
                path: path.to_path_buf(),
                error: e,
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

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("careerhub").join("config.toml")),
            Some(PathBuf::from("/etc/careerhub/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.store.apply_env_overrides();

        if let Some(breakpoint) = env_value(&["CAREERHUB_NAV_BREAKPOINT"]) {
            if let Ok(px) = breakpoint.parse() {
                self.navigation.breakpoint_px = px;
            }
        }

        if let Some(level) = env_value(&["CAREERHUB_LOG_LEVEL"]) {
            self.logging.level = level;
        }
        if let Some(format) = env_value(&["CAREERHUB_LOG_FORMAT"]) {
            self.logging.format = format;
        }
    }
}

/// First non-empty value among `names`
fn env_value(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid navigation links in {path:?}: {error}")]
    Navigation { path: PathBuf, error: CatalogError },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# CareerHub Configuration
#
# Environment variables override these settings:
# - STORE_HOST, STORE_PORT, STORE_USERNAME, STORE_PASSWORD
#   (REDIS_HOST, REDIS_PORT, REDIS_USERNAME, REDIS_PASSWORD are accepted too)
# - CAREERHUB_NAV_BREAKPOINT
# - CAREERHUB_LOG_LEVEL
# - CAREERHUB_LOG_FORMAT

[store]
# Session store host
host = "localhost"

# Session store port
port = 6379

# Optional credentials
# username = "default"
# password = ""

# Give up a connection attempt after this many milliseconds
connect_timeout_ms = 5000

[navigation]
# Viewport width (px) at which the desktop header replaces the mobile menu
breakpoint_px = 768

# Uncomment to replace the built-in header links.
# Each link sets exactly one of `route` or `anchor`.
# [[navigation.links]]
# name = "Browse"
# route = "/browse"
# icon = "briefcase"
#
# [[navigation.links]]
# name = "Plans"
# anchor = "pricing"
# icon = "credit-card"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
