//! Infrastructure layer - configuration, provider selection, logging
//!
//! Turns the process configuration into ready-to-use translation and speech
//! adapters and installs the tracing subscriber.

pub mod config;
pub mod selector;
pub mod telemetry;

pub use config::{AppConfig, LogFormat};
pub use selector::{select_speaker, select_translator, speaker_config, translator_config};
pub use telemetry::{TelemetryError, init_logging};
