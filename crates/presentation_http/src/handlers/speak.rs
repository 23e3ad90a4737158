//! `POST /speak`
//!
//! Errors on this route use the flat `{"detail": ...}` body.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use domain::{AudioFormat, SpeechRequest};
use infrastructure::select_speaker;
use serde::Deserialize;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{ValidatedJson, ValidationError, not_blank},
    state::AppState,
};

fn default_response_format() -> String {
    AudioFormat::default().to_string()
}

/// Speech request body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SpeakBody {
    #[validate(custom(function = "not_blank"))]
    pub text: String,
    #[validate(custom(function = "not_blank"))]
    pub lang: String,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default = "default_response_format")]
    pub response_format: String,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl SpeakBody {
    fn into_request(self) -> Result<SpeechRequest, domain::ServiceError> {
        let format: AudioFormat = self.response_format.parse()?;
        let mut request = SpeechRequest::new(self.text, self.lang)?.with_format(format);
        if let Some(voice) = self.voice {
            request = request.with_voice(voice);
        }
        if let Some(instructions) = self.instructions {
            request = request.with_instructions(instructions);
        }
        Ok(request)
    }
}

/// Synthesise speech and return the raw audio
#[instrument(skip_all)]
pub async fn speak(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<SpeakBody>, ValidationError>,
) -> Result<Response, ApiError> {
    let ValidatedJson(body) = payload.map_err(|e| ApiError::speech(e.into()))?;
    let request = body.into_request().map_err(ApiError::speech)?;

    let config = state.config.load();
    let speaker = select_speaker(&config).map_err(ApiError::speech)?;

    info!(
        provider = speaker.provider().config_key(),
        model = speaker.model(),
        lang = request.lang(),
        format = %request.format(),
        "Speech request received"
    );

    let result = speaker.speak(&request).await.map_err(ApiError::speech)?;

    info!(bytes = result.audio().len(), "Speech synthesis completed");

    let content_type = result.mime_type().into_owned();
    Ok(([(header::CONTENT_TYPE, content_type)], result.into_audio()).into_response())
}
