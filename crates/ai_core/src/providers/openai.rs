//! OpenAI translation adapter

use async_trait::async_trait;
use domain::{ServiceError, TranslationProvider, TranslationRequest, TranslationResult};
use reqwest::header::HeaderMap;

use crate::chat::ChatClient;
use crate::config::TranslatorConfig;
use crate::ports::Translator;

/// Translator backed by OpenAI chat completions
#[derive(Debug)]
pub struct OpenAITranslator {
    chat: ChatClient,
}

impl OpenAITranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self, ServiceError> {
        let chat = ChatClient::new(TranslationProvider::OpenAI, config, HeaderMap::new())?;
        Ok(Self { chat })
    }
}

#[async_trait]
impl Translator for OpenAITranslator {
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
        TranslationProvider::OpenAI
    }

    fn model(&self) -> &str {
        self.chat.model()
    }
}
