//! Speech synthesis request and result

use std::borrow::Cow;

use crate::errors::ServiceError;
use crate::value_objects::AudioFormat;

/// A validated request to synthesise speech
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    text: String,
    lang: String,
    voice: Option<String>,
    format: AudioFormat,
    instructions: Option<String>,
}

impl SpeechRequest {
    /// Create a speech request with no voice, mp3 output and no instructions
    pub fn new(text: impl Into<String>, lang: impl Into<String>) -> Result<Self, ServiceError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ServiceError::invalid_request("Text must not be empty"));
        }
        Ok(Self {
            text,
            lang: lang.into(),
            voice: None,
            format: AudioFormat::default(),
            instructions: None,
        })
    }

    /// Use a specific voice; blank values are ignored
    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        let voice = voice.into();
        if !voice.trim().is_empty() {
            self.voice = Some(voice);
        }
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    /// Free-text delivery instructions; blank values are ignored
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        let instructions = instructions.into();
        if !instructions.trim().is_empty() {
            self.instructions = Some(instructions);
        }
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    #[must_use]
    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    /// The format the caller wants back
    #[must_use]
    pub const fn format(&self) -> &AudioFormat {
        &self.format
    }

    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }
}

/// Synthesised audio and the container format it is encoded in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechResult {
    audio: Vec<u8>,
    format: AudioFormat,
}

impl SpeechResult {
    #[must_use]
    pub const fn new(audio: Vec<u8>, format: AudioFormat) -> Self {
        Self { audio, format }
    }

    #[must_use]
    pub fn audio(&self) -> &[u8] {
        &self.audio
    }

    #[must_use]
    pub fn into_audio(self) -> Vec<u8> {
        self.audio
    }

    #[must_use]
    pub const fn format(&self) -> &AudioFormat {
        &self.format
    }

    /// `Content-Type` for the audio; unlisted formats map to `audio/{name}`
    #[must_use]
    pub fn mime_type(&self) -> Cow<'static, str> {
        self.format.mime_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn new_applies_defaults() {
        let req = SpeechRequest::new("Hello", "English").unwrap();
        assert_eq!(req.format(), &AudioFormat::Mp3);
        assert!(req.voice().is_none());
        assert!(req.instructions().is_none());
        assert_eq!(req.lang(), "English");
    }

    #[test]
    fn new_rejects_blank_text() {
        let err = SpeechRequest::new("\n", "English").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn builders_set_optional_fields() {
        let req = SpeechRequest::new("Hello", "English")
            .unwrap()
            .with_voice("nova")
            .with_format(AudioFormat::Wav)
            .with_instructions("Speak slowly");
        assert_eq!(req.voice(), Some("nova"));
        assert_eq!(req.format(), &AudioFormat::Wav);
        assert_eq!(req.instructions(), Some("Speak slowly"));
    }

    #[test]
    fn blank_optional_fields_are_ignored() {
        let req = SpeechRequest::new("Hello", "English")
            .unwrap()
            .with_voice("  ")
            .with_instructions("");
        assert!(req.voice().is_none());
        assert!(req.instructions().is_none());
    }

    #[test]
    fn result_exposes_mime_type() {
        let result = SpeechResult::new(vec![1, 2, 3], AudioFormat::Wav);
        assert_eq!(result.mime_type(), "audio/wav");
        assert_eq!(result.audio(), &[1, 2, 3]);
        assert_eq!(result.into_audio(), vec![1, 2, 3]);
    }

    #[test]
    fn result_with_unlisted_format_uses_audio_name() {
        let result = SpeechResult::new(vec![0], AudioFormat::Other("aiff".to_string()));
        assert_eq!(result.mime_type(), "audio/aiff");
    }
}
