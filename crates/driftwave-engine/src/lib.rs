//! driftwave synthesis engine
//!
//! Procedural ambient-music synthesis: given a duration, tempo, key/mode,
//! and a handful of mix knobs, [`render()`] deterministically (when seeded)
//! layers four independently synthesized voices - a detuned harmonic pad,
//! filtered ocean-noise ambience, a plucked arpeggio, and a light percussion
//! bed - then mixes, fades, and peak-normalizes them into a loudness-safe
//! stereo buffer.
//!
//! # Determinism
//!
//! Given the same [`RenderParams`] with a seed, the output is byte-identical
//! across runs. All randomness flows through PCG32 streams, one per voice,
//! derived from the master seed via BLAKE3 hashing. Unseeded renders are
//! intentionally different run to run.
//!
//! # Example
//!
//! ```no_run
//! use driftwave_engine::{render, RenderParams, WavResult};
//!
//! let params = RenderParams {
//!     duration: 60.0,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let buffer = render(&params)?;
//! WavResult::from_buffer(&buffer, params.sample_rate)
//!     .write_to("out/music/track.wav".as_ref())?;
//! # Ok::<(), driftwave_engine::EngineError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`render()`] - the single operation exposed to callers
//! - [`theory`] - scales, triads, and chord progressions
//! - [`dsp`] - one-pole lowpass, fades, normalization, brightness tilt
//! - [`voices`] - the four voice synthesizers
//! - [`rng`] - deterministic RNG with per-voice seed derivation
//! - [`wav`] - deterministic WAV persistence adapter
//! - [`encode`] - optional external MP3 encoder capability

pub mod dsp;
pub mod encode;
pub mod error;
pub mod params;
pub mod render;
pub mod rng;
pub mod theory;
pub mod voices;
pub mod wav;

// Re-export main types at crate root
pub use dsp::StereoBuffer;
pub use encode::{EncodeOutcome, Mp3Encoder};
pub use error::{EngineError, EngineResult};
pub use params::{Mode, RenderParams, DEFAULT_SAMPLE_RATE};
pub use render::{render, MIX_HEADROOM};
pub use wav::WavResult;
