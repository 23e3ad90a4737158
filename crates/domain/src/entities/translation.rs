//! Translation request and result

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::value_objects::SourceLanguage;

/// A validated request to translate a piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    from_lang: String,
    to_lang: String,
}

impl TranslationRequest {
    /// Create a translation request
    ///
    /// `text` and `to_lang` must contain non-whitespace characters. `from_lang`
    /// may be the auto-detect sentinel.
    pub fn new(
        text: impl Into<String>,
        from_lang: impl Into<String>,
        to_lang: impl Into<String>,
    ) -> Result<Self, ServiceError> {
        let text = text.into();
        let from_lang = from_lang.into();
        let to_lang = to_lang.into();

        if text.trim().is_empty() {
            return Err(ServiceError::invalid_request("Text must not be empty"));
        }
        if to_lang.trim().is_empty() {
            return Err(ServiceError::invalid_request(
                "Target language must not be empty",
            ));
        }
        if from_lang.trim().is_empty() {
            return Err(ServiceError::invalid_request(
                "Source language must not be empty",
            ));
        }

        Ok(Self {
            text,
            from_lang,
            to_lang,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The source language exactly as supplied
    #[must_use]
    pub fn from_lang(&self) -> &str {
        &self.from_lang
    }

    #[must_use]
    pub fn to_lang(&self) -> &str {
        &self.to_lang
    }

    /// The source language, with the auto-detect sentinel recognised
    #[must_use]
    pub fn source_language(&self) -> SourceLanguage {
        SourceLanguage::parse(&self.from_lang)
    }
}

/// Outcome of a translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
    /// Resolved source language (the detected one when auto-detect was requested)
    pub from_lang: String,
    pub to_lang: String,
    /// Config key of the provider that served the request
    pub provider: String,
    pub model: String,
}
