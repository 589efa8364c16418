//! Core WAV writing and PCM conversion functions.

use std::io::{self, Write};

use super::format::WavFormat;

/// Writes a complete WAV file to a writer.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    let file_size = 36 + data_size; // Total file size minus the 8-byte RIFF header

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Chunk size (16 for PCM)
    writer.write_all(&1u16.to_le_bytes())?; // Audio format (1 = PCM)
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Writes a WAV file to a byte vector.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(44 + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data).expect("writing to Vec should not fail");
    buffer
}

/// Converts stereo f64 samples to interleaved 16-bit PCM bytes.
///
/// Samples are clipped to [-1.0, 1.0], scaled by 32767, and interleaved
/// left/right as little-endian i16.
pub fn stereo_to_pcm16(left: &[f64], right: &[f64]) -> Vec<u8> {
    let len = left.len().min(right.len());
    let mut pcm = Vec::with_capacity(len * 4); // 2 channels * 2 bytes per sample

    for i in 0..len {
        let left_pcm = (left[i].clamp(-1.0, 1.0) * 32767.0).round() as i16;
        pcm.extend_from_slice(&left_pcm.to_le_bytes());

        let right_pcm = (right[i].clamp(-1.0, 1.0) * 32767.0).round() as i16;
        pcm.extend_from_slice(&right_pcm.to_le_bytes());
    }

    pcm
}
