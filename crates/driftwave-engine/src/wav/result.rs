//! WAV file generation result type.

use std::fs;
use std::path::Path;

use crate::dsp::StereoBuffer;
use crate::error::EngineResult;

use super::format::WavFormat;
use super::writer::{stereo_to_pcm16, write_wav_to_vec};

/// A serialized WAV artifact.
#[derive(Debug)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM data only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples per channel.
    pub num_samples: usize,
}

impl WavResult {
    /// Serializes a rendered buffer to WAV bytes.
    pub fn from_buffer(buffer: &StereoBuffer, sample_rate: u32) -> Self {
        let pcm = stereo_to_pcm16(&buffer.left, &buffer.right);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let format = WavFormat::stereo(sample_rate);
        let wav_data = write_wav_to_vec(&format, &pcm);

        Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_samples: buffer.len(),
        }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }

    /// Writes the WAV bytes to a file, creating parent directories.
    pub fn write_to(&self, path: &Path) -> EngineResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &self.wav_data)?;
        Ok(())
    }
}
