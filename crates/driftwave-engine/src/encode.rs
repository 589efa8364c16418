//! Optional MP3 post-processing via an external `ffmpeg` encoder.
//!
//! The encoder is a capability, not a dependency: when `ffmpeg` is not on
//! the host the outcome is an explicit [`EncodeOutcome::Unavailable`] that
//! callers report as a warning. The uncompressed WAV artifact is a
//! successful result either way.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{EngineError, EngineResult};

/// Outcome of an encode attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeOutcome {
    /// A compressed sibling file was written at this path.
    Encoded(PathBuf),
    /// No encoder binary was found on the host.
    Unavailable,
}

/// MP3 encoder driven by an external `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct Mp3Encoder {
    /// LAME VBR quality (0 = best, 9 = worst).
    quality: u32,
}

impl Default for Mp3Encoder {
    fn default() -> Self {
        Self { quality: 2 }
    }
}

impl Mp3Encoder {
    /// Creates an encoder with the default VBR quality.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder with an explicit LAME VBR quality (0..=9).
    pub fn with_quality(quality: u32) -> Self {
        Self {
            quality: quality.min(9),
        }
    }

    /// The compressed sibling path for a WAV artifact.
    pub fn sibling_path(wav_path: &Path) -> PathBuf {
        wav_path.with_extension("mp3")
    }

    /// Encodes a decodable WAV file into an MP3 sibling.
    ///
    /// Returns `Unavailable` when `ffmpeg` is not on the PATH. Returns
    /// [`EngineError::Encode`] when the encoder ran but failed; callers
    /// treat that as non-fatal.
    pub fn encode(&self, wav_path: &Path) -> EngineResult<EncodeOutcome> {
        let ffmpeg = match which::which("ffmpeg") {
            Ok(path) => path,
            Err(_) => return Ok(EncodeOutcome::Unavailable),
        };

        let mp3_path = Self::sibling_path(wav_path);
        let output = Command::new(ffmpeg)
            .arg("-y")
            .arg("-hide_banner")
            .args(["-loglevel", "warning"])
            .arg("-i")
            .arg(wav_path)
            .args(["-codec:a", "libmp3lame"])
            .args(["-q:a", &self.quality.to_string()])
            .arg(&mp3_path)
            .output()?;

        if !output.status.success() {
            return Err(EngineError::encode(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(EncodeOutcome::Encoded(mp3_path))
    }
}
