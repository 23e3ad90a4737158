//! Groq text-to-speech adapter (PlayAI voices)

use async_trait::async_trait;
use domain::{AudioFormat, ServiceError, SpeechProvider, SpeechRequest, SpeechResult};
use tracing::{debug, instrument};

use crate::client::{SpeechClient, TtsRequest, resolve_format};
use crate::config::SpeakerConfig;
use crate::ports::Speaker;

pub const DEFAULT_VOICE: &str = "Fritz-PlayAI";

/// Groq only returns WAV
pub const NATIVE_FORMATS: &[AudioFormat] = &[AudioFormat::Wav];

const FALLBACK_FORMAT: AudioFormat = AudioFormat::Wav;

/// Speaker backed by Groq's `/audio/speech` endpoint
#[derive(Debug)]
pub struct GroqSpeaker {
    client: SpeechClient,
}

impl GroqSpeaker {
    pub fn new(config: &SpeakerConfig) -> Result<Self, ServiceError> {
        let client = SpeechClient::new(SpeechProvider::Groq, config)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Speaker for GroqSpeaker {
    #[instrument(skip_all, fields(provider = "groq", lang = %request.lang(), requested = %request.format()))]
    async fn speak(&self, request: &SpeechRequest) -> Result<SpeechResult, ServiceError> {
        if let Some(instructions) = request.instructions() {
            debug!(
                instructions_len = instructions.len(),
                "Groq does not support instructions, ignoring"
            );
        }

        let voice = request.voice().unwrap_or_else(|| self.default_voice());
        let format = resolve_format(
            SpeechProvider::Groq,
            request.format(),
            self.native_formats(),
            FALLBACK_FORMAT,
        );

        let body = TtsRequest {
            model: self.client.model(),
            input: request.text(),
            voice,
            response_format: format.as_str(),
            instructions: None,
        };

        let audio = self.client.synthesize(&body).await?;
        self.client.deliver(audio, &format, request.format()).await
    }

    fn provider(&self) -> SpeechProvider {
        SpeechProvider::Groq
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
