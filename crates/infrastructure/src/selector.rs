//! Provider selection
//!
//! Resolves the configured provider names into ready-to-use adapters. A fresh
//! adapter is built for every call so credential and model changes take
//! effect on the next request. Selection never touches the network.

use ai_core::{Translator, TranslatorConfig};
use ai_speech::{Speaker, SpeakerConfig};
use domain::{ServiceError, SpeechProvider, TranslationProvider};
use tracing::{debug, warn};

use crate::config::{AppConfig, DEFAULT_PROVIDER};

/// Normalise a provider name, substituting the default when blank
fn provider_name(raw: &str) -> String {
    let name = raw.trim().to_lowercase();
    if name.is_empty() {
        DEFAULT_PROVIDER.to_string()
    } else {
        name
    }
}

fn unsupported(raw: &str) -> ServiceError {
    warn!(provider = %raw, "Unsupported provider requested");
    ServiceError::invalid_request(format!("Unsupported provider: {}", raw.trim()))
}

fn missing_key(provider: &str, variable: &str) -> ServiceError {
    ServiceError::authentication(format!(
        "{provider} API key is not configured. Set {variable}."
    ))
}

fn not_compiled(name: &str) -> ServiceError {
    ServiceError::service_unavailable(format!(
        "Provider '{name}' is not available in this build"
    ))
}

/// Build the translation adapter named by `AI_SOURCE`
///
/// # Errors
///
/// - `invalid_request` (400) for an unknown provider name
/// - `authentication` (401) when the provider's API key is missing
/// - `service_unavailable` (503) when the adapter was compiled out
pub fn select_translator(config: &AppConfig) -> Result<Box<dyn Translator>, ServiceError> {
    let name = provider_name(&config.ai_source);
    let provider =
        TranslationProvider::from_config(&name).ok_or_else(|| unsupported(&config.ai_source))?;

    let translator_config = translator_config(config, provider)?;
    debug!(
        provider = provider.config_key(),
        model = %translator_config.model,
        "Selected translation provider"
    );

    match provider {
        #[cfg(feature = "openai")]
        TranslationProvider::OpenAI => Ok(Box::new(ai_core::OpenAITranslator::new(
            &translator_config,
        )?)),
        #[cfg(feature = "groq")]
        TranslationProvider::Groq => Ok(Box::new(ai_core::GroqTranslator::new(
            &translator_config,
        )?)),
        #[cfg(feature = "openrouter")]
        TranslationProvider::OpenRouter => Ok(Box::new(ai_core::OpenRouterTranslator::new(
            &translator_config,
        )?)),
        #[allow(unreachable_patterns)]
        _ => Err(not_compiled(&name)),
    }
}

/// Build the speech adapter named by `TTS_SOURCE`
///
/// # Errors
///
/// Same classification as [`select_translator`].
pub fn select_speaker(config: &AppConfig) -> Result<Box<dyn Speaker>, ServiceError> {
    let name = provider_name(&config.tts_source);
    let provider =
        SpeechProvider::from_config(&name).ok_or_else(|| unsupported(&config.tts_source))?;

    let speaker_config = speaker_config(config, provider)?;
    debug!(
        provider = provider.config_key(),
        model = %speaker_config.model,
        "Selected speech provider"
    );

    match provider {
        #[cfg(feature = "openai")]
        SpeechProvider::OpenAI => Ok(Box::new(ai_speech::OpenAISpeaker::new(&speaker_config)?)),
        #[cfg(feature = "groq")]
        SpeechProvider::Groq => Ok(Box::new(ai_speech::GroqSpeaker::new(&speaker_config)?)),
        #[allow(unreachable_patterns)]
        _ => Err(not_compiled(&name)),
    }
}

/// Assemble the adapter configuration for a translation provider
pub fn translator_config(
    config: &AppConfig,
    provider: TranslationProvider,
) -> Result<TranslatorConfig, ServiceError> {
    let (key, model, base_url) = match provider {
        TranslationProvider::OpenAI => (
            config.openai_key().ok_or_else(|| missing_key("OpenAI", "OPENAI_API_KEY"))?,
            &config.openai_model,
            &config.openai_base_url,
        ),
        TranslationProvider::Groq => (
            config.groq_key().ok_or_else(|| missing_key("Groq", "GROQ_API_KEY"))?,
            &config.groq_model,
            &config.groq_base_url,
        ),
        TranslationProvider::OpenRouter => (
            config
                .openrouter_key()
                .ok_or_else(|| missing_key("OpenRouter", "OPENROUTER_API_KEY"))?,
            &config.openrouter_model,
            &config.openrouter_base_url,
        ),
    };

    let mut translator_config = TranslatorConfig::for_provider(provider, key)
        .with_base_url(base_url.as_str())
        .with_timeout_ms(config.translation_timeout_secs.saturating_mul(1000));
    if !model.trim().is_empty() {
        translator_config = translator_config.with_model(model.as_str());
    }
    if provider == TranslationProvider::OpenRouter {
        translator_config =
            translator_config.with_site(config.site_url.clone(), config.site_name.clone());
    }
    Ok(translator_config)
}

/// Assemble the adapter configuration for a speech provider
pub fn speaker_config(
    config: &AppConfig,
    provider: SpeechProvider,
) -> Result<SpeakerConfig, ServiceError> {
    let (key, base_url) = match provider {
        SpeechProvider::OpenAI => (
            config.openai_key().ok_or_else(|| missing_key("OpenAI", "OPENAI_API_KEY"))?,
            &config.openai_base_url,
        ),
        SpeechProvider::Groq => (
            config.groq_key().ok_or_else(|| missing_key("Groq", "GROQ_API_KEY"))?,
            &config.groq_base_url,
        ),
    };

    let mut speaker_config = SpeakerConfig::for_provider(provider, key)
        .with_base_url(base_url.as_str())
        .with_timeout_ms(config.speech_timeout_secs.saturating_mul(1000));
    if let Some(model) = config.tts_model() {
        speaker_config = speaker_config.with_model(model);
    }
    if let Some(path) = config.ffmpeg_path.as_deref() {
        speaker_config = speaker_config.with_ffmpeg_path(path);
    }
    Ok(speaker_config)
}
