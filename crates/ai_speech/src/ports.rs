//! Port definitions for speech synthesis
//!
//! Defines the trait that speech adapters must implement.

use async_trait::async_trait;
use domain::{AudioFormat, ServiceError, SpeechProvider, SpeechRequest, SpeechResult};

/// Port for Text-to-Speech (TTS) implementations
///
/// # Example
///
/// ```ignore
/// use ai_speech::Speaker;
/// use domain::{AudioFormat, SpeechRequest};
///
/// async fn hello(speaker: &dyn Speaker) -> Result<Vec<u8>, ServiceError> {
///     let request = SpeechRequest::new("Hello!", "English")?.with_format(AudioFormat::Wav);
///     Ok(speaker.speak(&request).await?.into_audio())
/// }
/// ```
#[async_trait]
pub trait Speaker: Send + Sync {
    /// Synthesise speech for the request
    ///
    /// The returned audio is always encoded in the request's format. When the
    /// provider cannot produce that format natively, it is asked for its
    /// fallback format and the result is transcoded.
    ///
    /// # Errors
    ///
    /// Returns a `ServiceError` classified by the upstream or conversion failure.
    async fn speak(&self, request: &SpeechRequest) -> Result<SpeechResult, ServiceError>;

    /// The provider behind this adapter
    fn provider(&self) -> SpeechProvider;

    /// The TTS model identifier sent upstream
    fn model(&self) -> &str;

    /// Voice used when the request names none
    fn default_voice(&self) -> &'static str;

    /// Formats the provider can produce directly
    fn native_formats(&self) -> &'static [AudioFormat];
}
