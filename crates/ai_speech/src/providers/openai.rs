//! OpenAI text-to-speech adapter

use async_trait::async_trait;
use domain::{AudioFormat, ServiceError, SpeechProvider, SpeechRequest, SpeechResult};
use tracing::instrument;

use crate::client::{SpeechClient, TtsRequest, resolve_format};
use crate::config::SpeakerConfig;
use crate::ports::Speaker;

/// Voice used when the request names none
pub const DEFAULT_VOICE: &str = "alloy";

/// Formats the OpenAI speech endpoint can return
pub const NATIVE_FORMATS: &[AudioFormat] = &[
    AudioFormat::Mp3,
    AudioFormat::Opus,
    AudioFormat::Aac,
    AudioFormat::Flac,
    AudioFormat::Wav,
    AudioFormat::Pcm,
];

const FALLBACK_FORMAT: AudioFormat = AudioFormat::Mp3;

/// Speaker backed by OpenAI's `/audio/speech` endpoint
///
/// Forwards free-text `instructions` to steer delivery.
#[derive(Debug)]
pub struct OpenAISpeaker {
    client: SpeechClient,
}

impl OpenAISpeaker {
    pub fn new(config: &SpeakerConfig) -> Result<Self, ServiceError> {
        let client = SpeechClient::new(SpeechProvider::OpenAI, config)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Speaker for OpenAISpeaker {
    #[instrument(skip_all, fields(provider = "openai", lang = %request.lang(), requested = %request.format()))]
    async fn speak(&self, request: &SpeechRequest) -> Result<SpeechResult, ServiceError> {
        let voice = request.voice().unwrap_or_else(|| self.default_voice());
        let format = resolve_format(
            SpeechProvider::OpenAI,
            request.format(),
            self.native_formats(),
            FALLBACK_FORMAT,
        );

        let body = TtsRequest {
            model: self.client.model(),
            input: request.text(),
            voice,
            response_format: format.as_str(),
            instructions: request.instructions(),
        };

        let audio = self.client.synthesize(&body).await?;
        self.client.deliver(audio, &format, request.format()).await
    }

    fn provider(&self) -> SpeechProvider {
        SpeechProvider::OpenAI
    }

    fn model(&self) -> &str {
        self.client.model()
    }

    fn default_voice(&self) -> &'static str {
        DEFAULT_VOICE
    }

    fn native_formats(&self) -> &'static [AudioFormat] {
        NATIVE_FORMATS
    }
}
