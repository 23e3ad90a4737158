//! Prompt construction and model output clean-up

use serde::Serialize;

/// Sampling temperature for translations
pub const TRANSLATION_TEMPERATURE: f32 = 0.3;
/// Sampling temperature for language detection
pub const DETECTION_TEMPERATURE: f32 = 0.1;

const TRANSLATION_SYSTEM_PROMPT: &str = "You are an expert translator. Translate the given text \
     accurately and naturally. Preserve the meaning, tone, and style of the original text. Only \
     return the translated text without any additional explanations or notes.";

const DETECTION_SYSTEM_PROMPT: &str = "You are a language identification expert. Your task is \
     to identify the language of the given text. Respond with only the language name in English.";

/// One message of a chat-completion exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Messages asking the model to translate `text`
pub fn translation_messages(text: &str, from_lang: &str, to_lang: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(TRANSLATION_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Translate the following text from {from_lang} to {to_lang}: \"{text}\""
        )),
    ]
}

/// Messages asking the model to name the language of `text`
pub fn detection_messages(text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(DETECTION_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Identify the language of the following text. Respond with only the language name \
             in English (e.g., 'English', 'Spanish', 'French', etc.). Do not include any \
             additional text or explanations.\n\nText: \"{text}\""
        )),
    ]
}

const QUOTE_PAIRS: [(char, char); 4] = [('"', '"'), ('\'', '\''), ('“', '”'), ('‘', '’')];

/// Strip one pair of matching quotes spanning the whole string
pub fn strip_outer_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return text;
    };
    if QUOTE_PAIRS.contains(&(first, last)) {
        &text[first.len_utf8()..text.len() - last.len_utf8()]
    } else {
        text
    }
}

/// Trim model output and drop a single enclosing quote pair
pub fn clean_output(raw: &str) -> String {
    strip_outer_quotes(raw.trim()).to_string()
}
