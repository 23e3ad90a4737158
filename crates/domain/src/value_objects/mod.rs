//! Value Objects - Immutable, identity-less domain primitives

mod audio_format;
mod language;
mod provider;

pub use audio_format::AudioFormat;
pub use language::{AUTO_DETECT, SourceLanguage, is_auto_detect, same_language};
pub use provider::{SpeechProvider, TranslationProvider};
