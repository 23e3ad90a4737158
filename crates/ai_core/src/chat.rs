//! OpenAI-compatible chat-completion client and the shared translation flow
//!
//! OpenAI, Groq and OpenRouter all expose `POST {base}/chat/completions` with
//! the same request and response shapes, so every adapter drives one
//! [`ChatClient`] and differs only in base URL, defaults and extra headers.

use std::time::Duration;

use domain::{
    ErrorKind, ServiceError, SourceLanguage, TranslationProvider, TranslationRequest,
    TranslationResult, same_language,
};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::config::TranslatorConfig;
use crate::error::transport_error;
use crate::prompt::{
    ChatMessage, DETECTION_TEMPERATURE, TRANSLATION_TEMPERATURE, clean_output, detection_messages,
    translation_messages,
};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for one provider's chat-completion endpoint
#[derive(Debug)]
pub struct ChatClient {
    client: Client,
    provider: TranslationProvider,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl ChatClient {
    /// Build a client; `headers` are sent with every request
    pub fn new(
        provider: TranslationProvider,
        config: &TranslatorConfig,
        headers: HeaderMap,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ServiceError::unknown(format!(
                    "Failed to initialize {} client.",
                    provider.display_name()
                ))
                .with_cause(e)
            })?;

        debug!(
            provider = provider.config_key(),
            model = %config.model,
            base_url = %config.base_url,
            "Initialized chat client"
        );

        Ok(Self {
            client,
            provider,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub const fn provider(&self) -> TranslationProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Send one exchange and return the first choice's content, untrimmed
    #[instrument(skip(self, messages), fields(provider = self.provider.config_key(), model = %self.model))]
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, ServiceError> {
        let name = self.provider.display_name();
        let api_key = self.api_key.expose_secret();

        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, name, api_key))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = ServiceError::from_upstream_response(status.as_u16(), &text, name, api_key);
            error!(status = status.as_u16(), error_type = %err.kind(), "Chat completion failed");
            return Err(err);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, name, api_key))?;

        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes).map_err(|e| {
            ServiceError::unknown(format!("Failed to parse response from {name} API."))
                .with_cause(e)
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| ServiceError::unexpected_response(name))
    }

    /// Ask the model which language `text` is written in
    #[instrument(skip(self, text), fields(provider = self.provider.config_key()))]
    pub async fn detect_language(&self, text: &str) -> Result<String, ServiceError> {
        let raw = self
            .complete(&detection_messages(text), DETECTION_TEMPERATURE)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::Unknown => {
                    ServiceError::unknown(format!("Failed to detect language: {e}")).with_cause(e)
                },
                _ => e,
            })?;

        let language = clean_output(&raw);
        if language.is_empty() {
            return Err(ServiceError::unknown(
                "Failed to detect language: empty response",
            ));
        }

        debug!(language = %language, "Detected source language");
        Ok(language)
    }

    /// Resolve the source language, short-circuit identical languages, translate
    #[instrument(
        skip(self, request),
        fields(provider = self.provider.config_key(), model = %self.model, to_lang = %request.to_lang())
    )]
    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, ServiceError> {
        let from_lang = match request.source_language() {
            SourceLanguage::AutoDetect => self.detect_language(request.text()).await?,
            SourceLanguage::Named(name) => name,
        };

        if same_language(&from_lang, request.to_lang()) {
            debug!(from_lang = %from_lang, "Source and target language match, skipping upstream call");
            return Ok(self.result(request.text().to_string(), from_lang, request));
        }

        let raw = self
            .complete(
                &translation_messages(request.text(), &from_lang, request.to_lang()),
                TRANSLATION_TEMPERATURE,
            )
            .await?;

        info!(from_lang = %from_lang, "Translation completed");
        Ok(self.result(clean_output(&raw), from_lang, request))
    }

    fn result(
        &self,
        translated_text: String,
        from_lang: String,
        request: &TranslationRequest,
    ) -> TranslationResult {
        TranslationResult {
            translated_text,
            from_lang,
            to_lang: request.to_lang().to_string(),
            provider: self.provider.config_key().to_string(),
            model: self.model.clone(),
        }
    }
}

/// Insert a header when `value` is present and a valid header value
pub(crate) fn insert_optional_header(
    headers: &mut HeaderMap,
    name: &'static str,
    value: Option<&str>,
) {
    if let Some(value) = value.and_then(|v| HeaderValue::from_str(v.trim()).ok()) {
        headers.insert(HeaderName::from_static(name), value);
    }
}
