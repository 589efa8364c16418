//! Light percussion bed: a soft kick on each beat and a noise hat on the
//! off-beat "and". Disabled entirely when its level is at or near zero.

use std::f64::consts::TAU;

use rand_pcg::Pcg32;

use crate::dsp::{one_pole_lowpass, StereoBuffer};
use crate::params::RenderParams;
use crate::rng::next_gaussian;

/// Level at or below this renders silence.
const DISABLE_THRESHOLD: f64 = 1e-6;
/// Kick: length, pitch, decay time constant, amplitude.
const KICK_LEN: f64 = 0.25;
const KICK_FREQ: f64 = 50.0;
const KICK_DECAY: f64 = 0.09;
const KICK_AMP: f64 = 0.4;
/// Hat: length, highpass split cutoff, decay time constant, amplitude.
const HAT_LEN: f64 = 0.08;
const HAT_SPLIT_CUTOFF: f64 = 8000.0;
const HAT_DECAY: f64 = 0.03;
const HAT_AMP: f64 = 0.15;
/// Hat channel gains for a light stereo spread.
const HAT_LEFT_GAIN: f64 = 0.9;
const HAT_RIGHT_GAIN: f64 = 1.1;

/// Renders the percussion voice over the whole track length.
///
/// The hat's noise burst is generated once and reused on every off-beat, so
/// each hat is the same tick; only the kick/hat placement follows the beat
/// grid.
pub fn synthesize(params: &RenderParams, rng: &mut Pcg32) -> StereoBuffer {
    let n = params.num_samples();
    if params.percussion_level <= DISABLE_THRESHOLD {
        return StereoBuffer::silence(n);
    }

    let sr = params.sample_rate as f64;
    let mut out = StereoBuffer::silence(n);
    let beat = 60.0 / params.bpm;

    // Low sine thump with fast decay.
    let kick: Vec<f64> = (0..(KICK_LEN * sr) as usize)
        .map(|i| {
            let t = i as f64 / sr;
            KICK_AMP * (TAU * KICK_FREQ * t).sin() * (-t / KICK_DECAY).exp()
        })
        .collect();

    // Bright tick: noise minus its lowpassed copy is a crude highpass.
    let hat_noise: Vec<f64> = (0..(HAT_LEN * sr) as usize)
        .map(|_| next_gaussian(rng))
        .collect();
    let hat_low = one_pole_lowpass(&hat_noise, HAT_SPLIT_CUTOFF, params.sample_rate);
    let hat: Vec<f64> = hat_noise
        .iter()
        .zip(&hat_low)
        .enumerate()
        .map(|(i, (&x, &l))| {
            let t = i as f64 / sr;
            (x - l) * (-t / HAT_DECAY).exp() * HAT_AMP
        })
        .collect();

    let mut t = 0.0;
    while t < params.duration {
        let ks = (t * sr) as usize;
        if ks < n {
            let ke = n.min(ks + kick.len());
            for (i, &s) in kick[..ke - ks].iter().enumerate() {
                out.left[ks + i] += s;
                out.right[ks + i] += s;
            }
        }

        let hs = ((t + beat / 2.0) * sr) as usize;
        if hs < n {
            let he = n.min(hs + hat.len());
            for (i, &s) in hat[..he - hs].iter().enumerate() {
                out.left[hs + i] += s * HAT_LEFT_GAIN;
                out.right[hs + i] += s * HAT_RIGHT_GAIN;
            }
        }

        t += beat;
    }

    for s in out.left.iter_mut().chain(out.right.iter_mut()) {
        *s *= params.percussion_level;
    }
    out
}
