//! Domain entities - Requests and results flowing through the adapters

mod speech;
mod translation;

pub use speech::{SpeechRequest, SpeechResult};
pub use translation::{TranslationRequest, TranslationResult};
