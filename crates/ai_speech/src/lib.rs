//! AI Speech - Text-to-Speech adapters
//!
//! Provides the [`Speaker`] port, adapters for the OpenAI and Groq speech
//! endpoints, and an FFmpeg-backed [`AudioConverter`] used when a provider
//! cannot emit the requested container format.
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port)
//! - `providers` module contains concrete implementations (adapters), each
//!   behind a cargo feature of the same name
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{GroqSpeaker, Speaker, SpeakerConfig};
//! use domain::{AudioFormat, SpeechProvider, SpeechRequest};
//!
//! let speaker = GroqSpeaker::new(&SpeakerConfig::for_provider(SpeechProvider::Groq, key))?;
//! let request = SpeechRequest::new("Hello, world!", "English")?.with_format(AudioFormat::Mp3);
//! let audio = speaker.speak(&request).await?; // wav from Groq, transcoded to mp3
//! ```

mod client;
pub mod config;
pub mod converter;
mod error;
pub mod ports;
pub mod providers;

pub use client::SpeechClient;
pub use config::SpeakerConfig;
pub use converter::AudioConverter;
pub use ports::Speaker;
#[cfg(feature = "groq")]
pub use providers::groq::GroqSpeaker;
#[cfg(feature = "openai")]
pub use providers::openai::OpenAISpeaker;
