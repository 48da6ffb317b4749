//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::ai::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
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

    /// Upper bound on live chat sessions
    #[serde(default = "default_max_chat_sessions")]
    pub max_chat_sessions: usize,

    /// Seconds without activity after which a chat session may be reclaimed
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_max_chat_sessions() -> usize {
    1000
}

fn default_session_idle_secs() -> u64 {
    3600
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_chat_sessions: default_max_chat_sessions(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Text-generation service configuration
#[derive(Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key. Without one, AI features are disabled.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// No timeout when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Ground chat answers with web search
    #[serde(default)]
    pub chat_search: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            request_timeout_secs: None,
            chat_search: false,
        }
    }
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("chat_search", &self.chat_search)
            .finish()
    }
}

impl AiConfig {
    /// Settings for the Gemini client
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            request_timeout_secs: self.request_timeout_secs,
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

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
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

    /// Load from an explicit path, or from default locations, or environment
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("health-saarthi").join("config.toml")),
            Some(PathBuf::from("/etc/health-saarthi/config.toml")),
            Some(PathBuf::from("./config.toml")),
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
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(host) = lookup("HEALTH_SAARTHI_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("HEALTH_SAARTHI_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid HEALTH_SAARTHI_API_PORT: {}", port),
            }
        }

        // AI overrides; the service-specific key wins over the generic one
        if let Some(key) = lookup("HEALTH_SAARTHI_API_KEY").or_else(|| lookup("GEMINI_API_KEY")) {
            self.ai.api_key = Some(key);
        }
        if let Some(model) = lookup("HEALTH_SAARTHI_MODEL") {
            self.ai.model = model;
        }
        if let Some(base_url) = lookup("HEALTH_SAARTHI_AI_BASE_URL") {
            self.ai.base_url = base_url;
        }

        // Logging overrides
        if let Some(level) = lookup("HEALTH_SAARTHI_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("HEALTH_SAARTHI_LOG_FORMAT") {
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
    format!(
        r#"# Health Saarthi Configuration
#
# Environment variables override these settings:
# - HEALTH_SAARTHI_API_HOST
# - HEALTH_SAARTHI_API_PORT
# - HEALTH_SAARTHI_API_KEY (or GEMINI_API_KEY)
# - HEALTH_SAARTHI_MODEL
# - HEALTH_SAARTHI_AI_BASE_URL
# - HEALTH_SAARTHI_LOG_LEVEL
# - HEALTH_SAARTHI_LOG_FORMAT

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

# Allowed CORS origins (empty = any)
cors_origins = []

# Maximum number of live chat sessions
max_chat_sessions = 1000

# Idle chat sessions are reclaimed after this many seconds
session_idle_secs = 3600

[ai]
# Gemini API key. AI features are disabled without one.
# api_key = ""

# Model used for both the chat and the planner
model = "{model}"

# API root
base_url = "{base_url}"

# Optional request timeout in seconds (unset = wait indefinitely)
# request_timeout_secs = 60

# Ground chat answers with web search and show sources
chat_search = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        model = DEFAULT_MODEL,
        base_url = DEFAULT_BASE_URL,
    )
}
