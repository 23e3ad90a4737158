//! OpenRouter translation adapter

use async_trait::async_trait;
use domain::{ServiceError, TranslationProvider, TranslationRequest, TranslationResult};
use reqwest::header::HeaderMap;

use crate::chat::{ChatClient, insert_optional_header};
use crate::config::TranslatorConfig;
use crate::ports::Translator;

/// Translator backed by OpenRouter chat completions
///
/// Sends the optional `HTTP-Referer` and `X-Title` attribution headers when
/// `site_url` / `site_name` are configured.
#[derive(Debug)]
pub struct OpenRouterTranslator {
    chat: ChatClient,
}

impl OpenRouterTranslator {
    pub fn new(config: &TranslatorConfig) -> Result<Self, ServiceError> {
        let mut headers = HeaderMap::new();
        insert_optional_header(&mut headers, "http-referer", config.site_url.as_deref());
        insert_optional_header(&mut headers, "x-title", config.site_name.as_deref());

        let chat = ChatClient::new(TranslationProvider::OpenRouter, config, headers)?;
        Ok(Self { chat })
    }
}

#[async_trait]
impl Translator for OpenRouterTranslator {
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
        TranslationProvider::OpenRouter
    }

    fn model(&self) -> &str {
        self.chat.model()
    }
}
