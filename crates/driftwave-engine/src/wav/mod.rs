//! Deterministic WAV persistence adapter.
//!
//! Writes 16-bit stereo PCM with no timestamps or variable metadata, so the
//! same rendered buffer always serializes to the same bytes. This module is
//! the only place floating samples become fixed-point.

mod format;
mod result;
mod writer;


pub use format::WavFormat;
pub use result::WavResult;
pub use writer::{stereo_to_pcm16, write_wav, write_wav_to_vec};
