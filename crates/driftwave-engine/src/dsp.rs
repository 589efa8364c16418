//! Signal primitives shared by the voices and the render pipeline.
//!
//! Everything here operates on `f64` sample buffers. The one-pole lowpass
//! is an inherently sequential scan (each output depends on the previous)
//! and is kept that way per channel.

use std::f64::consts::PI;

/// A pair of equal-length left/right sample buffers.
///
/// This is the currency passed between the voices and the mixer. Each stage
/// owns the buffer it is working on; voices produce fresh buffers and the
/// mixer combines them additively into one output.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoBuffer {
    /// Left channel samples.
    pub left: Vec<f64>,
    /// Right channel samples.
    pub right: Vec<f64>,
}

impl StereoBuffer {
    /// Creates a silent buffer with the given number of samples per channel.
    pub fn silence(num_samples: usize) -> Self {
        Self {
            left: vec![0.0; num_samples],
            right: vec![0.0; num_samples],
        }
    }

    /// Number of samples per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Adds `other` into this buffer, scaled by `gain`.
    pub fn add_scaled(&mut self, other: &StereoBuffer, gain: f64) {
        for (dst, src) in self.left.iter_mut().zip(&other.left) {
            *dst += gain * src;
        }
        for (dst, src) in self.right.iter_mut().zip(&other.right) {
            *dst += gain * src;
        }
    }

    /// Maximum absolute sample across both channels.
    pub fn peak(&self) -> f64 {
        self.left
            .iter()
            .chain(&self.right)
            .fold(0.0_f64, |acc, s| acc.max(s.abs()))
    }

    /// Returns true if every sample is exactly zero.
    pub fn is_silent(&self) -> bool {
        self.left.iter().chain(&self.right).all(|&s| s == 0.0)
    }
}

/// Applies a causal single-pole lowpass (exponential smoother) to a signal.
///
/// Time constant RC = 1/(2*pi*cutoff); smoothing coefficient
/// a = dt/(RC + dt), applied sample by sample. A cutoff at or below zero is
/// an explicit bypass returning the input unchanged, never a NaN source.
pub fn one_pole_lowpass(signal: &[f64], cutoff_hz: f64, sample_rate: u32) -> Vec<f64> {
    if cutoff_hz <= 0.0 {
        return signal.to_vec();
    }
    let dt = 1.0 / sample_rate as f64;
    let rc = 1.0 / (2.0 * PI * cutoff_hz);
    let a = dt / (rc + dt);

    let mut out = Vec::with_capacity(signal.len());
    let mut acc = 0.0;
    for &x in signal {
        acc += a * (x - acc);
        out.push(acc);
    }
    out
}

/// Applies linear fade-in and fade-out ramps in place.
///
/// The first `fade_in` seconds ramp 0 -> 1 and the last `fade_out` seconds
/// ramp 1 -> 0. A zero or negative length is a no-op for that side.
pub fn fade_in_out(signal: &mut [f64], fade_in: f64, fade_out: f64, sample_rate: u32) {
    let n = signal.len();
    let fi = ((fade_in.max(0.0)) * sample_rate as f64) as usize;
    let fo = ((fade_out.max(0.0)) * sample_rate as f64) as usize;

    if fi > 0 {
        let fi = fi.min(n);
        for (i, s) in signal[..fi].iter_mut().enumerate() {
            // Ramps from exactly 0 to exactly 1 across the window.
            *s *= if fi > 1 { i as f64 / (fi - 1) as f64 } else { 0.0 };
        }
    }
    if fo > 0 {
        let fo = fo.min(n);
        for (i, s) in signal[n - fo..].iter_mut().enumerate() {
            *s *= if fo > 1 {
                (fo - 1 - i) as f64 / (fo - 1) as f64
            } else {
                0.0
            };
        }
    }
}

/// Peak floor used when normalizing, so silence never divides by zero.
const PEAK_EPSILON: f64 = 1e-9;

/// Scales both channels uniformly so the peak does not exceed `target_peak`.
///
/// Only ever attenuates: quiet material is left untouched, so relative
/// channel balance is preserved exactly in every case.
pub fn normalize_stereo_peak(buffer: &mut StereoBuffer, target_peak: f64) {
    let peak = buffer.peak().max(PEAK_EPSILON);
    let gain = (target_peak / peak).min(1.0);
    if gain < 1.0 {
        for s in buffer.left.iter_mut().chain(buffer.right.iter_mut()) {
            *s *= gain;
        }
    }
}

/// Cutoff of the residual highpass used by the brightness tilt.
const TILT_CUTOFF_HZ: f64 = 1200.0;

/// One-knob high-shelf approximation.
///
/// Adds `amount` times the high-passed residual (signal minus its lowpassed
/// copy) back onto the signal. Amounts at or below zero are a no-op; the
/// amount is clamped to [0, 1].
pub fn tilt_brightness(signal: &[f64], amount: f64, sample_rate: u32) -> Vec<f64> {
    let amount = amount.clamp(0.0, 1.0);
    if amount <= 1e-6 {
        return signal.to_vec();
    }
    let low = one_pole_lowpass(signal, TILT_CUTOFF_HZ, sample_rate);
    signal
        .iter()
        .zip(&low)
        .map(|(&x, &l)| x + amount * (x - l))
        .collect()
}
