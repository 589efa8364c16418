//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! All randomness in the engine flows through this module. Each voice gets
//! its own stream, derived from the master seed and the voice's name, so a
//! seeded render is bit-identical no matter in which order the voices run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 64-bit master seed.
pub fn create_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Derives an independent seed for a named voice from the master seed.
///
/// Hashes the master seed (little-endian bytes) concatenated with the voice
/// key via BLAKE3 and truncates to 64 bits.
pub fn derive_voice_seed(master_seed: u64, voice: &str) -> u64 {
    let mut input = Vec::with_capacity(8 + voice.len());
    input.extend_from_slice(&master_seed.to_le_bytes());
    input.extend_from_slice(voice.as_bytes());

    let hash = blake3::hash(&input);
    let bytes: [u8; 8] = hash.as_bytes()[0..8].try_into().unwrap();
    u64::from_le_bytes(bytes)
}

/// Creates the RNG stream for a named voice.
pub fn create_voice_rng(master_seed: u64, voice: &str) -> Pcg32 {
    create_rng(derive_voice_seed(master_seed, voice))
}

/// Draws a standard-normal sample via the Box-Muller transform.
///
/// Two uniform draws per sample keeps the stream consumption deterministic
/// and avoids pulling in a distributions crate for one use.
pub fn next_gaussian(rng: &mut Pcg32) -> f64 {
    // gen::<f64>() is in [0, 1); shift away from zero before the log.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
