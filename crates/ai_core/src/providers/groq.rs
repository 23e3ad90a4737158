//! Groq translation adapter
//!
//! Groq serves an OpenAI-compatible API under `/openai/v1`.

use async_trait::async_trait;
use domain::{ServiceError, TranslationProvider, TranslationRequest, TranslationResult};
use reqwest::header::HeaderMap;

use crate::chat::ChatClient;
use crate::config::TranslatorConfig;
use crate::ports::Translator;

/// Translator backed by Groq chat completions
#[derive(Debug)]
pub struct GroqTranslator {
    chat: ChatClient,
}

impl GroqTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self, ServiceError> {
        let chat = ChatClient::new(TranslationProvider::Groq, config, HeaderMap::new())?;
        Ok(Self { chat })
    }
}

#[async_trait]
impl Translator for GroqTranslator {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, ServiceError> {
        self.chat.translate(request).await
    }

    async fn detect_language(&self, text: &str) -> Result<String, ServiceError> {
        self.chat.detect_language(text).await
    }

    fn provider(&self) -> TranslationProvider {
        TranslationProvider::Groq
    }

    fn model(&self) -> &str {
        self.chat.model()
    }
}
