//! End-to-end tests for the HTTP API
//!
//! Drives the real router with `axum-test`; upstream providers are `wiremock`
//! servers.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use infrastructure::AppConfig;
use presentation_http::{AppState, ReloadableConfig, create_router};
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OPENAI_KEY: &str = "sk-test-openai-0001";
const GROQ_KEY: &str = "gsk-test-groq-0001";
const NO_FFMPEG: &str = "/nonexistent/ffmpeg";

fn config_for(upstream: &MockServer) -> AppConfig {
    AppConfig {
        openai_api_key: Some(SecretString::from(OPENAI_KEY)),
        openai_base_url: upstream.uri(),
        groq_api_key: Some(SecretString::from(GROQ_KEY)),
        groq_base_url: upstream.uri(),
        translation_timeout_secs: 5,
        speech_timeout_secs: 5,
        ffmpeg_path: Some(NO_FFMPEG.to_string()),
        ..AppConfig::default()
    }
}

fn server_with(config: AppConfig) -> TestServer {
    let state = AppState::new(ReloadableConfig::new(config));
    TestServer::new(create_router(state)).expect("test server")
}

fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    }))
}

fn wav_bytes() -> Vec<u8> {
    let mut data = b"RIFF".to_vec();
    data.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
    data.extend_from_slice(b"WAVEfmt ");
    data
}

// ============ Liveness ============

#[tokio::test]
async fn root_reports_running() {
    let server = server_with(AppConfig::default());

    let response = server.get("/").await;

    response.assert_status_ok();
    response.assert_json(&json!({"message": "llm-translate is running"}));
}

#[tokio::test]
async fn health_reports_ok() {
    let server = server_with(AppConfig::default());

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn responses_carry_request_id() {
    let server = server_with(AppConfig::default());

    let response = server.get("/health").await;
    assert!(!response.header("x-request-id").is_empty());

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("caller-supplied-42"),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "caller-supplied-42");
}

// ============ Translate ============

#[tokio::test]
async fn translate_with_openai() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", format!("Bearer {OPENAI_KEY}").as_str()))
        .and(body_partial_json(json!({"model": "gpt-4.1-mini-2025-04-14"})))
        .respond_with(chat_reply("¡Hola, mundo!"))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = server_with(config_for(&upstream));

    let response = server
        .post("/translate")
        .json(&json!({
            "text": "Hello, world!",
            "from_lang": "English",
            "to_lang": "Spanish"
        }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "translated_text": "¡Hola, mundo!",
        "from_lang": "English",
        "to_lang": "Spanish",
        "service_used": "openai",
        "model_used": "gpt-4.1-mini-2025-04-14"
    }));
}

#[tokio::test]
async fn translate_reports_detected_language() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"temperature": 0.1})))
        .respond_with(chat_reply("\"French\""))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"temperature": 0.3})))
        .respond_with(chat_reply("Good morning"))
        .expect(1)
        .mount(&upstream)
        .await;

    let mut config = config_for(&upstream);
    config.ai_source = "groq".to_string();
    let server = server_with(config);

    let response = server
        .post("/translate")
        .json(&json!({"text": "Bonjour", "from_lang": "Auto-detect", "to_lang": "English"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["translated_text"], "Good morning");
    assert_eq!(body["from_lang"], "French");
    assert_eq!(body["service_used"], "groq");
}

#[tokio::test]
async fn translate_unsupported_provider() {
    let config = AppConfig {
        ai_source: "deepl".to_string(),
        ..AppConfig::default()
    };
    let server = server_with(config);

    let response = server
        .post("/translate")
        .json(&json!({"text": "Hello", "from_lang": "English", "to_lang": "Spanish"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["type"], "invalid_request_error");
    assert_eq!(body["error"]["message"], "Unsupported provider: deepl");
    assert!(body["error"]["details"].is_null());
}

#[tokio::test]
async fn translate_missing_api_key() {
    let server = server_with(AppConfig::default());

    let response = server
        .post("/translate")
        .json(&json!({"text": "Hello", "from_lang": "English", "to_lang": "Spanish"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["type"], "authentication_error");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("OPENAI_API_KEY")
    );
}

#[tokio::test]
async fn translate_blank_text_is_rejected() {
    let server = server_with(AppConfig::default());

    let response = server
        .post("/translate")
        .json(&json!({"text": "   ", "from_lang": "English", "to_lang": "Spanish"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["type"], "invalid_request_error");
    assert_eq!(body["error"]["message"], "text: must not be blank");
}

#[tokio::test]
async fn translate_upstream_auth_failure_hides_key() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": format!("Incorrect API key provided: {OPENAI_KEY}")}
        })))
        .mount(&upstream)
        .await;

    let server = server_with(config_for(&upstream));

    let response = server
        .post("/translate")
        .json(&json!({"text": "Hello", "from_lang": "English", "to_lang": "Spanish"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let text = response.text();
    assert!(!text.contains(OPENAI_KEY));
    let body: Value = response.json();
    assert_eq!(body["error"]["type"], "authentication_error");
}

#[tokio::test]
async fn translate_upstream_outage_is_connection_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstream)
        .await;

    let server = server_with(config_for(&upstream));

    let response = server
        .post("/translate")
        .json(&json!({"text": "Hello", "from_lang": "English", "to_lang": "Spanish"}))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"]["type"], "connection_error");
}

#[tokio::test]
async fn translate_follows_replaced_config() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", format!("Bearer {GROQ_KEY}").as_str()))
        .respond_with(chat_reply("Hallo"))
        .expect(1)
        .mount(&upstream)
        .await;

    let reloadable = ReloadableConfig::new(AppConfig {
        ai_source: "nope".to_string(),
        ..config_for(&upstream)
    });
    let server =
        TestServer::new(create_router(AppState::new(reloadable.clone()))).expect("test server");

    let response = server
        .post("/translate")
        .json(&json!({"text": "Hello", "from_lang": "English", "to_lang": "German"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    reloadable.replace(AppConfig {
        ai_source: "groq".to_string(),
        ..config_for(&upstream)
    });

    let response = server
        .post("/translate")
        .json(&json!({"text": "Hello", "from_lang": "English", "to_lang": "German"}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["translated_text"], "Hallo");
    assert_eq!(body["service_used"], "groq");
}

// ============ Speak ============

#[tokio::test]
async fn speak_groq_wav_is_passed_through() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .and(header("authorization", format!("Bearer {GROQ_KEY}").as_str()))
        .and(body_partial_json(json!({
            "model": "playai-tts",
            "voice": "Fritz-PlayAI",
            "response_format": "wav"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/wav")
                .set_body_bytes(wav_bytes()),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let mut config = config_for(&upstream);
    config.tts_source = "groq".to_string();
    let server = server_with(config);

    let response = server
        .post("/speak")
        .json(&json!({"text": "Hallo Welt", "lang": "German", "response_format": "wav"}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "audio/wav");
    assert_eq!(response.as_bytes().to_vec(), wav_bytes());
}

#[tokio::test]
async fn speak_openai_defaults_to_mp3() {
    let upstream = MockServer::start().await;
    let audio = vec![0xFF, 0xFB, 0x90, 0x00];
    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini-tts",
            "voice": "alloy",
            "response_format": "mp3",
            "instructions": "Cheerful"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(audio.clone()))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = server_with(config_for(&upstream));

    let response = server
        .post("/speak")
        .json(&json!({"text": "Hello", "lang": "English", "instructions": "Cheerful"}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "audio/mpeg");
    assert_eq!(response.as_bytes().to_vec(), audio);
}

#[tokio::test]
async fn speak_validation_error_is_flattened() {
    let server = server_with(AppConfig::default());

    let response = server
        .post("/speak")
        .json(&json!({"text": "Hello", "lang": " "}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"detail": "lang: must not be blank"}));
}

#[tokio::test]
async fn speak_malformed_format_is_rejected() {
    let server = server_with(AppConfig::default());

    let response = server
        .post("/speak")
        .json(&json!({"text": "Hello", "lang": "English", "response_format": "mp3;rm"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"detail": "Unsupported audio format: mp3;rm"}));
}

#[tokio::test]
async fn speak_unlisted_format_goes_through_conversion() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .and(body_partial_json(json!({"response_format": "mp3"})))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xFB, 0x90, 0x00]))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = server_with(config_for(&upstream));

    let response = server
        .post("/speak")
        .json(&json!({"text": "Hello", "lang": "English", "response_format": "aiff"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"detail": "Failed to convert audio from mp3 to aiff"}));
}

#[cfg(unix)]
#[tokio::test]
async fn speak_unlisted_format_is_served_as_audio_name() {
    use std::os::unix::fs::PermissionsExt;

    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xFB, 0x90, 0x00]))
        .mount(&upstream)
        .await;

    // Pass-through stand-in for FFmpeg
    let dir = tempfile::tempdir().unwrap();
    let ffmpeg = dir.path().join("ffmpeg");
    std::fs::write(&ffmpeg, "#!/bin/sh\ncat\n").unwrap();
    std::fs::set_permissions(&ffmpeg, std::fs::Permissions::from_mode(0o755)).unwrap();

    let config = AppConfig {
        ffmpeg_path: Some(ffmpeg.to_string_lossy().into_owned()),
        ..config_for(&upstream)
    };
    let server = server_with(config);

    let response = server
        .post("/speak")
        .json(&json!({"text": "Hello", "lang": "English", "response_format": "AIFF"}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "audio/aiff");
    assert_eq!(response.as_bytes().to_vec(), vec![0xFF, 0xFB, 0x90, 0x00]);
}

#[tokio::test]
async fn speak_missing_key_is_flattened() {
    let config = AppConfig {
        tts_source: "groq".to_string(),
        ..AppConfig::default()
    };
    let server = server_with(config);

    let response = server
        .post("/speak")
        .json(&json!({"text": "Hello", "lang": "English"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("GROQ_API_KEY"));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn speak_rate_limit_keeps_status() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "Rate limit reached"}
        })))
        .mount(&upstream)
        .await;

    let server = server_with(config_for(&upstream));

    let response = server
        .post("/speak")
        .json(&json!({"text": "Hello", "lang": "English"}))
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn speak_failed_conversion_is_bad_request() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .and(body_partial_json(json!({"response_format": "wav"})))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(wav_bytes()))
        .expect(1)
        .mount(&upstream)
        .await;

    let mut config = config_for(&upstream);
    config.tts_source = "groq".to_string();
    let server = server_with(config);

    let response = server
        .post("/speak")
        .json(&json!({"text": "Hello", "lang": "English", "response_format": "mp3"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"detail": "Failed to convert audio from wav to mp3"}));
}
