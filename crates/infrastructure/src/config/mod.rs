//! Application configuration
//!
//! All settings are flat keys named after their environment variables
//! (`AI_SOURCE`, `OPENAI_API_KEY`, ...). Sources, lowest precedence first:
//! built-in defaults, an optional `config.{toml,yaml,json}` file in the
//! working directory, then the process environment.
//!
//! [`AppConfig::load_with_env_file`] additionally layers a dotenv file over
//! the process environment, so a running server can pick up edits to it.

use std::fmt;
use std::path::Path;

use ai_core::config::{
    DEFAULT_GROQ_BASE_URL, DEFAULT_GROQ_MODEL, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL,
    DEFAULT_OPENROUTER_BASE_URL, DEFAULT_OPENROUTER_MODEL,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Provider used when `AI_SOURCE` / `TTS_SOURCE` are unset
pub const DEFAULT_PROVIDER: &str = "openai";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Translation provider name (openai, groq, openrouter)
    #[serde(default = "default_provider")]
    pub ai_source: String,

    /// Speech provider name (openai, groq)
    #[serde(default = "default_provider")]
    pub tts_source: String,

    #[serde(default, skip_serializing)]
    pub openai_api_key: Option<SecretString>,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    #[serde(default, skip_serializing)]
    pub groq_api_key: Option<SecretString>,

    #[serde(default = "default_groq_model")]
    pub groq_model: String,

    #[serde(default = "default_groq_base_url")]
    pub groq_base_url: String,

    #[serde(default, skip_serializing)]
    pub openrouter_api_key: Option<SecretString>,

    #[serde(default = "default_openrouter_model")]
    pub openrouter_model: String,

    #[serde(default = "default_openrouter_base_url")]
    pub openrouter_base_url: String,

    /// Speech model for whichever speech provider is active
    /// (falls back to that provider's default when unset)
    #[serde(default)]
    pub tts_model: Option<String>,

    /// OpenRouter attribution referer
    #[serde(default)]
    pub site_url: Option<String>,

    /// OpenRouter attribution title
    #[serde(default)]
    pub site_name: Option<String>,

    /// Timeout for translation and detection calls
    #[serde(default = "default_translation_timeout_secs")]
    pub translation_timeout_secs: u64,

    /// Timeout for speech synthesis calls
    #[serde(default = "default_speech_timeout_secs")]
    pub speech_timeout_secs: u64,

    /// FFmpeg binary used for audio conversion (defaults to "ffmpeg" in PATH)
    #[serde(default)]
    pub ffmpeg_path: Option<String>,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Comma-separated CORS origins (empty = allow any origin)
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.to_string()
}

fn default_openai_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.to_string()
}

fn default_groq_base_url() -> String {
    DEFAULT_GROQ_BASE_URL.to_string()
}

fn default_openrouter_model() -> String {
    DEFAULT_OPENROUTER_MODEL.to_string()
}

fn default_openrouter_base_url() -> String {
    DEFAULT_OPENROUTER_BASE_URL.to_string()
}

const fn default_translation_timeout_secs() -> u64 {
    30
}

const fn default_speech_timeout_secs() -> u64 {
    60
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai_source: default_provider(),
            tts_source: default_provider(),
            openai_api_key: None,
            openai_model: default_openai_model(),
            openai_base_url: default_openai_base_url(),
            groq_api_key: None,
            groq_model: default_groq_model(),
            groq_base_url: default_groq_base_url(),
            openrouter_api_key: None,
            openrouter_model: default_openrouter_model(),
            openrouter_base_url: default_openrouter_base_url(),
            tts_model: None,
            site_url: None,
            site_name: None,
            translation_timeout_secs: default_translation_timeout_secs(),
            speech_timeout_secs: default_speech_timeout_secs(),
            ffmpeg_path: None,
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            cors_allowed_origins: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the optional config file and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(config::Environment::default().try_parsing(true))
    }

    /// Load configuration using a specific environment source
    pub fn load_with(environment: config::Environment) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(environment)
            .build()?;
        config.try_deserialize()
    }

    /// Load configuration with the entries of a dotenv file taking
    /// precedence over the process environment
    ///
    /// The file is read on every call and the process environment is left
    /// untouched.
    pub fn load_with_env_file(path: &Path) -> Result<Self, config::ConfigError> {
        let mut vars: config::Map<String, String> = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();

        let entries =
            dotenvy::from_path_iter(path).map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
        for entry in entries {
            let (key, value) = entry.map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
            vars.insert(key, value);
        }

        Self::load_with(
            config::Environment::default()
                .try_parsing(true)
                .source(Some(vars)),
        )
    }

    /// Address to bind the HTTP server to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configured CORS origins; empty means any origin
    #[must_use]
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .as_deref()
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Non-blank OpenAI key
    #[must_use]
    pub fn openai_key(&self) -> Option<&str> {
        non_blank_secret(self.openai_api_key.as_ref())
    }

    #[must_use]
    pub fn groq_key(&self) -> Option<&str> {
        non_blank_secret(self.groq_api_key.as_ref())
    }

    #[must_use]
    pub fn openrouter_key(&self) -> Option<&str> {
        non_blank_secret(self.openrouter_api_key.as_ref())
    }

    /// Configured speech model, ignoring blank values
    #[must_use]
    pub fn tts_model(&self) -> Option<&str> {
        self.tts_model.as_deref().filter(|m| !m.trim().is_empty())
    }
}

fn non_blank_secret(secret: Option<&SecretString>) -> Option<&str> {
    secret
        .map(ExposeSecret::expose_secret)
        .filter(|s| !s.trim().is_empty())
}
