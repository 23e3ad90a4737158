//! Port definitions for translation
//!
//! Defines the trait that every translation adapter implements. The provider
//! selector hands out adapters as `Box<dyn Translator>`.

use async_trait::async_trait;
use domain::{ServiceError, TranslationProvider, TranslationRequest, TranslationResult};

/// Port for text translation through an LLM provider
///
/// # Example
///
/// ```ignore
/// use ai_core::Translator;
/// use domain::TranslationRequest;
///
/// async fn to_spanish(translator: &dyn Translator, text: &str) -> Result<String, ServiceError> {
///     let request = TranslationRequest::new(text, "auto-detect", "Spanish")?;
///     Ok(translator.translate(&request).await?.translated_text)
/// }
/// ```
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate the request's text into its target language
    ///
    /// When the source language is the auto-detect sentinel it is resolved
    /// first through [`Translator::detect_language`]. When source and target
    /// name the same language the text is returned unchanged without any
    /// upstream call.
    ///
    /// # Errors
    ///
    /// Returns a `ServiceError` classified by the upstream failure.
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, ServiceError>;

    /// Name, in English, the language `text` is written in
    async fn detect_language(&self, text: &str) -> Result<String, ServiceError>;

    /// The provider behind this adapter
    fn provider(&self) -> TranslationProvider;

    /// The model identifier sent upstream
    fn model(&self) -> &str;
}
