//! Configuration for speech synthesis

use secrecy::SecretString;
use serde::Deserialize;

use domain::SpeechProvider;

/// Default OpenAI TTS model
pub const DEFAULT_OPENAI_TTS_MODEL: &str = "gpt-4o-mini-tts";
/// Default Groq TTS model
pub const DEFAULT_GROQ_TTS_MODEL: &str = "playai-tts";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Configuration for one speech adapter
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerConfig {
    /// Bearer credential for the provider
    pub api_key: SecretString,

    /// Text-to-speech model
    pub model: String,

    /// API base URL; `/audio/speech` is appended
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// FFmpeg binary used for format conversion (defaults to "ffmpeg" in PATH)
    #[serde(default)]
    pub ffmpeg_path: Option<String>,
}

const fn default_timeout_ms() -> u64 {
    60_000 // 60 seconds
}

impl SpeakerConfig {
    /// Config with the provider's default model and base URL
    pub fn for_provider(provider: SpeechProvider, api_key: impl Into<String>) -> Self {
        let (model, base_url) = match provider {
            SpeechProvider::OpenAI => (DEFAULT_OPENAI_TTS_MODEL, DEFAULT_OPENAI_BASE_URL),
            SpeechProvider::Groq => (DEFAULT_GROQ_TTS_MODEL, DEFAULT_GROQ_BASE_URL),
        };
        Self {
            api_key: SecretString::from(api_key.into()),
            model: model.to_string(),
            base_url: base_url.to_string(),
            timeout_ms: default_timeout_ms(),
            ffmpeg_path: None,
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

    #[must_use]
    pub fn with_ffmpeg_path(mut self, path: impl Into<String>) -> Self {
        self.ffmpeg_path = Some(path.into());
        self
    }
}
