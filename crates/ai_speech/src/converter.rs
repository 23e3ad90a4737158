//! Audio format converter
//!
//! Transcodes synthesised speech between container formats when a provider
//! cannot produce the format the caller asked for. Bytes are piped through
//! FFmpeg's stdin/stdout; nothing touches the disk.

use std::process::Stdio;

use domain::{AudioFormat, ServiceError};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Sample rate of raw PCM produced by the OpenAI speech endpoint
const PCM_SAMPLE_RATE: &str = "24000";

/// Audio converter for transforming between audio formats
///
/// Uses FFmpeg for audio conversion. FFmpeg must be installed on the system.
#[derive(Debug, Clone, Default)]
pub struct AudioConverter {
    /// FFmpeg binary path (defaults to "ffmpeg" in PATH)
    ffmpeg_path: Option<String>,
}

impl AudioConverter {
    #[must_use]
    pub const fn new() -> Self {
        Self { ffmpeg_path: None }
    }

    #[must_use]
    pub fn with_ffmpeg_path(path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: Some(path.into()),
        }
    }

    fn ffmpeg_path(&self) -> &str {
        self.ffmpeg_path.as_deref().unwrap_or("ffmpeg")
    }

    /// Check if FFmpeg is available on the system
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        Command::new(self.ffmpeg_path())
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|status| status.success())
    }

    /// Convert `audio` encoded as `from` into `to`
    ///
    /// Identical formats return the input untouched without spawning FFmpeg.
    ///
    /// # Errors
    ///
    /// Returns a `bad_request` error naming both formats when FFmpeg cannot be
    /// started, exits unsuccessfully or produces no output.
    #[instrument(skip(self, audio), fields(input_size = audio.len(), from = %from, to = %to))]
    pub async fn convert(
        &self,
        audio: Vec<u8>,
        from: &AudioFormat,
        to: &AudioFormat,
    ) -> Result<Vec<u8>, ServiceError> {
        if from == to {
            debug!("Audio already in target format, skipping conversion");
            return Ok(audio);
        }

        let fail = |detail: String| {
            warn!(detail = %detail, "Audio conversion failed");
            ServiceError::bad_request(format!("Failed to convert audio from {from} to {to}"))
                .with_detail(detail)
        };

        let mut cmd = Command::new(self.ffmpeg_path());
        cmd.args(["-hide_banner", "-loglevel", "error"]);
        if *from == AudioFormat::Pcm {
            cmd.args(["-ar", PCM_SAMPLE_RATE, "-ac", "1"]);
        }
        cmd.args(["-f", Self::demuxer(from), "-i", "pipe:0"]);
        Self::add_format_options(&mut cmd, to);
        cmd.args(["-f", Self::muxer(to), "pipe:1"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| fail(format!("Failed to spawn FFmpeg: {e}")))?;

        // Feed stdin concurrently so a full stdout pipe cannot stall the writer
        let writer = child.stdin.take().map(|mut stdin| {
            tokio::spawn(async move {
                let result = stdin.write_all(&audio).await;
                drop(stdin);
                result
            })
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| fail(format!("Failed to wait for FFmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(fail(format!("FFmpeg exited with {}: {}", output.status, stderr.trim())));
        }

        if let Some(writer) = writer {
            match writer.await {
                Ok(Ok(())) => {},
                Ok(Err(e)) => return Err(fail(format!("Failed to write to FFmpeg stdin: {e}"))),
                Err(e) => return Err(fail(format!("FFmpeg writer task failed: {e}"))),
            }
        }

        if output.stdout.is_empty() {
            return Err(fail("FFmpeg produced empty output".to_string()));
        }

        debug!(output_size = output.stdout.len(), "Conversion successful");
        Ok(output.stdout)
    }

    /// FFmpeg demuxer name for reading `format`
    fn demuxer(format: &AudioFormat) -> &str {
        match format {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Opus | AudioFormat::Ogg => "ogg",
            AudioFormat::Aac => "aac",
            AudioFormat::Flac => "flac",
            AudioFormat::Wav => "wav",
            AudioFormat::Pcm => "s16le",
            AudioFormat::Webm => "matroska",
            AudioFormat::M4a => "mov",
            AudioFormat::Other(name) => name,
        }
    }

    /// FFmpeg muxer name for writing `format`
    fn muxer(format: &AudioFormat) -> &str {
        match format {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Opus => "opus",
            AudioFormat::Aac => "adts",
            AudioFormat::Flac => "flac",
            AudioFormat::Wav => "wav",
            AudioFormat::Pcm => "s16le",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Webm => "webm",
            AudioFormat::M4a => "ipod", // FFmpeg uses "ipod" for m4a
            AudioFormat::Other(name) => name,
        }
    }

    /// Add format-specific encoding options
    ///
    /// Unlisted formats get none; FFmpeg picks the muxer's default codec.
    fn add_format_options(cmd: &mut Command, format: &AudioFormat) {
        match format {
            AudioFormat::Mp3 => {
                cmd.args(["-codec:a", "libmp3lame", "-q:a", "2"]);
            },
            AudioFormat::Opus | AudioFormat::Webm => {
                cmd.args(["-codec:a", "libopus", "-b:a", "48k"]);
            },
            AudioFormat::Aac => {
                cmd.args(["-codec:a", "aac", "-b:a", "128k"]);
            },
            AudioFormat::Flac => {
                cmd.args(["-codec:a", "flac", "-compression_level", "5"]);
            },
            AudioFormat::Wav | AudioFormat::Pcm => {
                cmd.args(["-codec:a", "pcm_s16le"]);
            },
            AudioFormat::Ogg => {
                cmd.args(["-codec:a", "libvorbis", "-q:a", "4"]);
            },
            AudioFormat::M4a => {
                // ipod muxer needs a seekable output unless fragmented
                cmd.args(["-codec:a", "aac", "-b:a", "128k"])
                    .args(["-movflags", "frag_keyframe+empty_moov"]);
            },
            AudioFormat::Other(_) => {},
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::ErrorKind;

    use super::*;

    #[test]
    fn ffmpeg_path_default() {
        assert_eq!(AudioConverter::new().ffmpeg_path(), "ffmpeg");
        assert_eq!(AudioConverter::default().ffmpeg_path(), "ffmpeg");
    }

    #[test]
    fn ffmpeg_path_custom() {
        let converter = AudioConverter::with_ffmpeg_path("/custom/ffmpeg");
        assert_eq!(converter.ffmpeg_path(), "/custom/ffmpeg");
    }

    #[test]
    fn muxer_mapping() {
        assert_eq!(AudioConverter::muxer(&AudioFormat::Mp3), "mp3");
        assert_eq!(AudioConverter::muxer(&AudioFormat::Aac), "adts");
        assert_eq!(AudioConverter::muxer(&AudioFormat::M4a), "ipod");
        assert_eq!(AudioConverter::muxer(&AudioFormat::Pcm), "s16le");
        assert_eq!(AudioConverter::muxer(&AudioFormat::Other("aiff".into())), "aiff");
    }

    #[test]
    fn demuxer_mapping() {
        assert_eq!(AudioConverter::demuxer(&AudioFormat::Wav), "wav");
        assert_eq!(AudioConverter::demuxer(&AudioFormat::Opus), "ogg");
        assert_eq!(AudioConverter::demuxer(&AudioFormat::Webm), "matroska");
        assert_eq!(AudioConverter::demuxer(&AudioFormat::M4a), "mov");
        assert_eq!(AudioConverter::demuxer(&AudioFormat::Other("au".into())), "au");
    }

    #[tokio::test]
    async fn identical_formats_are_a_no_op() {
        // A bogus FFmpeg path proves nothing is spawned
        let converter = AudioConverter::with_ffmpeg_path("/nonexistent/ffmpeg");
        for format in [AudioFormat::Mp3, AudioFormat::Wav, AudioFormat::Other("aiff".into())] {
            let out = converter.convert(vec![9, 8, 7], &format, &format).await.unwrap();
            assert_eq!(out, vec![9, 8, 7]);
        }
    }

    #[tokio::test]
    async fn missing_ffmpeg_is_bad_request() {
        let converter = AudioConverter::with_ffmpeg_path("/nonexistent/ffmpeg");
        let err = converter
            .convert(vec![0, 1, 2, 3], &AudioFormat::Wav, &AudioFormat::Mp3)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Failed to convert audio from wav to mp3");
        assert!(err.details().unwrap().contains("spawn"));
    }

    #[tokio::test]
    async fn is_available_returns_false_for_invalid_path() {
        let converter = AudioConverter::with_ffmpeg_path("/nonexistent/path/to/ffmpeg");
        assert!(!converter.is_available().await);
    }

    /// Shell scripts standing in for the FFmpeg binary
    #[cfg(unix)]
    mod scripted {
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;

        use tempfile::TempDir;

        use super::*;

        fn fake_ffmpeg(body: &str) -> (TempDir, AudioConverter) {
            let dir = tempfile::tempdir().unwrap();
            let path: PathBuf = dir.path().join("ffmpeg");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            let converter = AudioConverter::with_ffmpeg_path(path.to_string_lossy());
            (dir, converter)
        }

        #[tokio::test]
        async fn large_input_streams_through_without_stalling() {
            let (_dir, converter) = fake_ffmpeg("cat");
            let audio: Vec<u8> = (0..8_000_000usize).map(|i| u8::try_from(i % 251).unwrap()).collect();

            let out = converter
                .convert(audio.clone(), &AudioFormat::Wav, &AudioFormat::Mp3)
                .await
                .unwrap();

            assert_eq!(out.len(), audio.len());
            assert!(out == audio);
        }

        #[tokio::test]
        async fn nonzero_exit_carries_stderr_as_detail() {
            let (_dir, converter) = fake_ffmpeg("echo diag >&2\nexit 1");

            let err = converter
                .convert(vec![1, 2, 3], &AudioFormat::Wav, &AudioFormat::Mp3)
                .await
                .unwrap_err();

            assert_eq!(err.kind(), ErrorKind::BadRequest);
            assert_eq!(err.message(), "Failed to convert audio from wav to mp3");
            let detail = err.details().unwrap();
            assert!(detail.contains("diag"), "{detail}");
        }

        #[tokio::test]
        async fn empty_output_is_bad_request() {
            let (_dir, converter) = fake_ffmpeg("cat >/dev/null");

            let err = converter
                .convert(vec![1, 2, 3], &AudioFormat::Mp3, &AudioFormat::Flac)
                .await
                .unwrap_err();

            assert_eq!(err.kind(), ErrorKind::BadRequest);
            assert_eq!(err.message(), "Failed to convert audio from mp3 to flac");
            assert!(err.details().unwrap().contains("empty output"));
        }

        #[tokio::test]
        async fn unlisted_format_is_handed_to_ffmpeg_by_name() {
            let (_dir, converter) = fake_ffmpeg("cat >/dev/null\necho \"$@\"");

            let out = converter
                .convert(vec![1, 2, 3], &AudioFormat::Mp3, &AudioFormat::Other("aiff".into()))
                .await
                .unwrap();

            let args = String::from_utf8(out).unwrap();
            assert!(args.contains("-f mp3 -i pipe:0"), "{args}");
            assert!(args.trim_end().ends_with("-f aiff pipe:1"), "{args}");
            assert!(!args.contains("-codec:a"), "{args}");
        }
    }
}
