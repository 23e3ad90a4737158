//! HTTP client for `POST {base}/audio/speech`, shared by both providers

use std::time::Duration;

use domain::{AudioFormat, ServiceError, SpeechProvider, SpeechResult};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, error, instrument, warn};

use crate::config::SpeakerConfig;
use crate::converter::AudioConverter;
use crate::error::transport_error;

/// OpenAI-compatible speech request body
#[derive(Debug, Serialize)]
pub(crate) struct TtsRequest<'a> {
    pub model: &'a str,
    pub input: &'a str,
    pub voice: &'a str,
    pub response_format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<&'a str>,
}

/// Client for one provider's speech endpoint
#[derive(Debug)]
pub struct SpeechClient {
    client: Client,
    provider: SpeechProvider,
    api_key: SecretString,
    model: String,
    base_url: String,
    converter: AudioConverter,
}

impl SpeechClient {
    pub fn new(provider: SpeechProvider, config: &SpeakerConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                ServiceError::unknown(format!(
                    "Failed to initialize {} speech client.",
                    provider.display_name()
                ))
                .with_cause(e)
            })?;

        let converter = config
            .ffmpeg_path
            .as_deref()
            .map_or_else(AudioConverter::new, AudioConverter::with_ffmpeg_path);

        debug!(
            provider = provider.config_key(),
            model = %config.model,
            base_url = %config.base_url,
            "Initialized speech client"
        );

        Ok(Self {
            client,
            provider,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            converter,
        })
    }

    pub const fn provider(&self) -> SpeechProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn speech_url(&self) -> String {
        format!("{}/audio/speech", self.base_url)
    }

    /// Issue the upstream call and return the raw audio body
    #[instrument(
        skip(self, body),
        fields(provider = self.provider.config_key(), model = %self.model, format = body.response_format)
    )]
    pub(crate) async fn synthesize(&self, body: &TtsRequest<'_>) -> Result<Vec<u8>, ServiceError> {
        let name = self.provider.display_name();
        let api_key = self.api_key.expose_secret();

        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(e, name, api_key))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = ServiceError::from_upstream_response(status.as_u16(), &text, name, api_key);
            error!(status = status.as_u16(), error_type = %err.kind(), "Speech synthesis failed");
            return Err(err);
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, name, api_key))?;

        debug!(audio_size = audio.len(), "Speech synthesis complete");
        Ok(audio.to_vec())
    }

    /// Transcode `audio` from `produced` into `requested` when they differ
    pub(crate) async fn deliver(
        &self,
        audio: Vec<u8>,
        produced: &AudioFormat,
        requested: &AudioFormat,
    ) -> Result<SpeechResult, ServiceError> {
        let audio = self.converter.convert(audio, produced, requested).await?;
        Ok(SpeechResult::new(audio, requested.clone()))
    }
}

/// Pick the format to request upstream
///
/// Returns `requested` when the provider supports it natively, otherwise
/// `fallback` (logging the substitution).
pub(crate) fn resolve_format(
    provider: SpeechProvider,
    requested: &AudioFormat,
    native: &[AudioFormat],
    fallback: AudioFormat,
) -> AudioFormat {
    if native.contains(requested) {
        requested.clone()
    } else {
        warn!(
            provider = provider.config_key(),
            requested = %requested,
            fallback = %fallback,
            "Requested audio format not supported natively, using fallback"
        );
        fallback
    }
}
