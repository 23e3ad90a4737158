//! Configuration for translation adapters

use secrecy::SecretString;
use serde::Deserialize;

use domain::TranslationProvider;

/// Default OpenAI chat model
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-mini-2025-04-14";
/// Default Groq chat model
pub const DEFAULT_GROQ_MODEL: &str = "meta-llama/llama-4-maverick-17b-128e-instruct";
/// Default OpenRouter chat model
pub const DEFAULT_OPENROUTER_MODEL: &str = "qwen/qwen3-4b:free";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Configuration for one translation adapter
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorConfig {
    /// Bearer credential for the provider
    pub api_key: SecretString,

    /// Chat model identifier
    pub model: String,

    /// API base URL; `/chat/completions` is appended
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Referer sent as `HTTP-Referer` (OpenRouter attribution)
    #[serde(default)]
    pub site_url: Option<String>,

    /// Display title sent as `X-Title` (OpenRouter attribution)
    #[serde(default)]
    pub site_name: Option<String>,
}

const fn default_timeout_ms() -> u64 {
    30_000 // 30 seconds
}

impl TranslatorConfig {
    /// Config with the provider's default model and base URL
    pub fn for_provider(provider: TranslationProvider, api_key: impl Into<String>) -> Self {
        let (model, base_url) = match provider {
            TranslationProvider::OpenAI => (DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_BASE_URL),
            TranslationProvider::Groq => (DEFAULT_GROQ_MODEL, DEFAULT_GROQ_BASE_URL),
            TranslationProvider::OpenRouter => {
                (DEFAULT_OPENROUTER_MODEL, DEFAULT_OPENROUTER_BASE_URL)
            },
        };
        Self {
            api_key: SecretString::from(api_key.into()),
            model: model.to_string(),
            base_url: base_url.to_string(),
            timeout_ms: default_timeout_ms(),
            site_url: None,
            site_name: None,
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the attribution headers; blank values are dropped
    #[must_use]
    pub fn with_site(mut self, site_url: Option<String>, site_name: Option<String>) -> Self {
        self.site_url = site_url.filter(|s| !s.trim().is_empty());
        self.site_name = site_name.filter(|s| !s.trim().is_empty());
        self
    }
}
