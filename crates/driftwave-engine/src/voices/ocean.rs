//! Filtered-noise ocean ambience voice.
//!
//! Gaussian white noise lowpassed into a dull rumble, with its amplitude
//! undulating under two slow phase-offset sinusoids. Both channels share the
//! same filtered noise at slightly different static gains; true per-channel
//! decorrelation was never part of the design.

use std::f64::consts::TAU;

use rand_pcg::Pcg32;

use crate::dsp::{one_pole_lowpass, StereoBuffer};
use crate::params::RenderParams;
use crate::rng::next_gaussian;

/// Rumble lowpass cutoff in Hz.
const RUMBLE_CUTOFF: f64 = 400.0;
/// Overall level of the undulation envelope.
const LEVEL: f64 = 0.18;
/// Undulation sinusoid rates in Hz and the phase offset of the second.
const SWELL_RATE_A: f64 = 0.08;
const SWELL_RATE_B: f64 = 0.093;
const SWELL_PHASE_B: f64 = 1.3;
/// Static channel gains for width.
const LEFT_GAIN: f64 = 0.9;
const RIGHT_GAIN: f64 = 1.1;

/// Renders the ocean voice over the whole track length.
pub fn synthesize(params: &RenderParams, rng: &mut Pcg32) -> StereoBuffer {
    let n = params.num_samples();
    let sr = params.sample_rate as f64;

    let white: Vec<f64> = (0..n).map(|_| next_gaussian(rng)).collect();
    let rumble = one_pole_lowpass(&white, RUMBLE_CUTOFF, params.sample_rate);

    let mut out = StereoBuffer::silence(n);
    for (i, &s) in rumble.iter().enumerate() {
        let t = i as f64 / sr;
        let amp = LEVEL
            * (0.6
                + 0.4 * (TAU * SWELL_RATE_A * t).sin()
                + 0.3 * (TAU * SWELL_RATE_B * t + SWELL_PHASE_B).sin());
        out.left[i] = s * amp * LEFT_GAIN;
        out.right[i] = s * amp * RIGHT_GAIN;
    }
    out
}
