//! `POST /translate`

use axum::{Json, extract::State};
use domain::TranslationRequest;
use infrastructure::select_translator;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{ValidatedJson, not_blank},
    state::AppState,
};

/// Translation request body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TranslateBody {
    #[validate(custom(function = "not_blank"))]
    pub text: String,
    /// Source language name, or `Auto-detect`
    #[validate(custom(function = "not_blank"))]
    pub from_lang: String,
    #[validate(custom(function = "not_blank"))]
    pub to_lang: String,
}

/// Translation response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    pub from_lang: String,
    pub to_lang: String,
    pub service_used: String,
    pub model_used: String,
}

/// Translate text with the configured provider
#[instrument(skip_all)]
pub async fn translate(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<TranslateBody>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let config = state.config.load();
    let request = TranslationRequest::new(body.text, body.from_lang, body.to_lang)?;
    let translator = select_translator(&config)?;

    info!(
        provider = translator.provider().config_key(),
        model = translator.model(),
        from = request.from_lang(),
        to = request.to_lang(),
        "Translation request received"
    );

    let result = translator.translate(&request).await?;

    info!(from = %result.from_lang, to = %result.to_lang, "Translation completed");

    Ok(Json(TranslateResponse {
        translated_text: result.translated_text,
        from_lang: result.from_lang,
        to_lang: result.to_lang,
        service_used: result.provider,
        model_used: result.model,
    }))
}
