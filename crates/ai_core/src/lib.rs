//! AI Core - Text translation through LLM providers
//!
//! Provides the [`Translator`] port and adapters for OpenAI, Groq and
//! OpenRouter. All three speak the OpenAI chat-completion protocol and share
//! one client, prompt set and error mapping. Each adapter is gated behind a
//! cargo feature of the same name (all enabled by default).

pub mod chat;
pub mod config;
mod error;
pub mod ports;
pub mod prompt;
pub mod providers;

pub use chat::ChatClient;
pub use config::TranslatorConfig;
pub use ports::Translator;
#[cfg(feature = "groq")]
pub use providers::groq::GroqTranslator;
#[cfg(feature = "openai")]
pub use providers::openai::OpenAITranslator;
#[cfg(feature = "openrouter")]
pub use providers::openrouter::OpenRouterTranslator;
