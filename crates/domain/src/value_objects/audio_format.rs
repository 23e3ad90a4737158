//! Audio container formats accepted and produced by speech synthesis

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Audio container formats
///
/// The named variants are the ones the converter knows codec settings for.
/// Any other well-formed name is carried as [`AudioFormat::Other`] and handed
/// to FFmpeg as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AudioFormat {
    /// MP3 format
    #[default]
    Mp3,
    /// Opus in an Ogg container
    Opus,
    /// AAC in an ADTS stream
    Aac,
    /// FLAC format (lossless)
    Flac,
    /// WAV format (uncompressed)
    Wav,
    /// Raw 16-bit little-endian PCM
    Pcm,
    /// OGG container (Vorbis)
    Ogg,
    /// WebM format
    Webm,
    /// M4A/AAC format
    M4a,
    /// Any other lowercase format name, e.g. `aiff`
    Other(String),
}

impl AudioFormat {
    /// Get the MIME type for this audio format
    #[must_use]
    pub fn mime_type(&self) -> Cow<'static, str> {
        match self {
            Self::Mp3 => Cow::Borrowed("audio/mpeg"),
            Self::Opus => Cow::Borrowed("audio/opus"),
            Self::Aac => Cow::Borrowed("audio/aac"),
            Self::Flac => Cow::Borrowed("audio/flac"),
            Self::Wav => Cow::Borrowed("audio/wav"),
            Self::Pcm => Cow::Borrowed("audio/pcm"),
            Self::Ogg => Cow::Borrowed("audio/ogg"),
            Self::Webm => Cow::Borrowed("audio/webm"),
            Self::M4a => Cow::Borrowed("audio/m4a"),
            Self::Other(name) => Cow::Owned(format!("audio/{name}")),
        }
    }

    /// Get the lowercase name, which doubles as the file extension
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Wav => "wav",
            Self::Pcm => "pcm",
            Self::Ogg => "ogg",
            Self::Webm => "webm",
            Self::M4a => "m4a",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = ServiceError;

    /// Parse a format name, case-insensitively
    ///
    /// Names outside the named variants must be non-empty ASCII
    /// alphanumerics or underscores; anything else is a `BadRequest`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        match name.as_str() {
            "mp3" => Ok(Self::Mp3),
            "opus" => Ok(Self::Opus),
            "aac" => Ok(Self::Aac),
            "flac" => Ok(Self::Flac),
            "wav" => Ok(Self::Wav),
            "pcm" => Ok(Self::Pcm),
            "ogg" => Ok(Self::Ogg),
            "webm" => Ok(Self::Webm),
            "m4a" => Ok(Self::M4a),
            other
                if !other.is_empty()
                    && other.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') =>
            {
                Ok(Self::Other(other.to_string()))
            },
            _ => Err(ServiceError::bad_request(format!(
                "Unsupported audio format: {s}"
            ))),
        }
    }
}

impl TryFrom<String> for AudioFormat {
    type Error = ServiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AudioFormat> for String {
    fn from(format: AudioFormat) -> Self {
        match format {
            AudioFormat::Other(name) => name,
            named => named.as_str().to_string(),
        }
    }
}
