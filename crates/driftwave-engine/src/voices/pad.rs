//! Detuned harmonic pad voice.
//!
//! Renders overlapping chord segments: three detuned sine partials per chord
//! tone, an octave below the written pitch, with a slow time-domain vibrato.
//! Each segment is lowpassed, brightness-tilted, edge-windowed, and placed
//! additively so consecutive segments crossfade into each other.

use std::f64::consts::TAU;

use rand::Rng;
use rand_pcg::Pcg32;

use crate::dsp::{one_pole_lowpass, tilt_brightness, StereoBuffer};
use crate::params::RenderParams;
use crate::theory::{midi_to_freq, Progression};

/// Length of one chord segment in seconds.
const CHORD_DURATION: f64 = 4.0;
/// Linear crossfade overlap between consecutive segments, in seconds.
const CROSSFADE: f64 = 0.5;
/// Cent offsets of the three partials per chord tone.
const DETUNE_CENTS: [f64; 3] = [0.0, -0.3, 0.3];
/// Amplitude of each partial.
const PARTIAL_AMP: f64 = 0.28;
/// Vibrato rate in Hz: base plus a small per-partial random jitter.
const VIBRATO_RATE_BASE: f64 = 0.08;
const VIBRATO_RATE_JITTER: f64 = 0.02;
/// Segment lowpass cutoff in Hz.
const TONE_CUTOFF: f64 = 2200.0;
/// Stereo width: left scaled by (1 - w), right by (1 + w).
const STEREO_WIDTH: f64 = 0.12;

/// Renders the pad voice over the whole track length.
pub fn synthesize(params: &RenderParams, progression: &Progression, rng: &mut Pcg32) -> StereoBuffer {
    let n = params.num_samples();
    let sr = params.sample_rate;
    let mut out = StereoBuffer::silence(n);

    let seg_len = ((CHORD_DURATION + CROSSFADE) * sr as f64).round() as usize;
    let num_segments = (params.duration / CHORD_DURATION).ceil() as usize;

    for idx in 0..num_segments {
        let start = (idx as f64 * CHORD_DURATION * sr as f64) as usize;
        if start >= n {
            break;
        }

        let chord = progression.chord(idx);
        let mut seg = vec![0.0; seg_len];
        for pitch in chord.pitches() {
            // One octave down for warmth.
            let f = midi_to_freq(pitch - 12.0);
            for cents in DETUNE_CENTS {
                let fm = f * 2.0_f64.powf(cents / 1200.0);
                let vib_rate = VIBRATO_RATE_BASE + VIBRATO_RATE_JITTER * rng.gen::<f64>();
                for (i, s) in seg.iter_mut().enumerate() {
                    let t = i as f64 / sr as f64;
                    // Sub-millisecond time wobble.
                    let vib = 0.2 + 0.1 * (TAU * vib_rate * t).sin();
                    *s += PARTIAL_AMP * (TAU * fm * (t + vib * 1e-3)).sin();
                }
            }
        }

        let seg = one_pole_lowpass(&seg, TONE_CUTOFF, sr);
        let mut seg = tilt_brightness(&seg, params.brightness, sr);
        apply_edge_window(&mut seg, (CROSSFADE * sr as f64) as usize);

        // Truncated final segment just runs short of the buffer.
        let end = n.min(start + seg.len());
        for (i, &s) in seg[..end - start].iter().enumerate() {
            out.left[start + i] += s * (1.0 - STEREO_WIDTH);
            out.right[start + i] += s * (1.0 + STEREO_WIDTH);
        }
    }

    out
}

/// Multiplies the first and last `edge` samples by linear ramps so that
/// overlapping segments crossfade.
fn apply_edge_window(seg: &mut [f64], edge: usize) {
    if edge == 0 || seg.len() < edge {
        return;
    }
    let n = seg.len();
    for i in 0..edge {
        let ramp = i as f64 / edge as f64;
        seg[i] *= ramp;
        seg[n - 1 - i] *= ramp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Mode;
    use crate::rng::create_rng;
    use crate::theory::Scale;

    fn test_params(duration: f64) -> RenderParams {
        RenderParams {
            duration,
            sample_rate: 8000,
            ..Default::default()
        }
    }

    fn test_progression() -> Progression {
        let scale = Scale::build("A", Mode::Minor).unwrap();
        Progression::build(&scale, Mode::Minor)
    }

    #[test]
    fn test_output_length() {
        let params = test_params(3.0);
        let prog = test_progression();
        let mut rng = create_rng(42);
        let buffer = synthesize(&params, &prog, &mut rng);
        assert_eq!(buffer.len(), params.num_samples());
    }

    #[test]
    fn test_determinism() {
        let params = test_params(2.0);
        let prog = test_progression();
        let a = synthesize(&params, &prog, &mut create_rng(42));
        let b = synthesize(&params, &prog, &mut create_rng(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_right_channel_is_wider() {
        let params = test_params(2.0);
        let prog = test_progression();
        let buffer = synthesize(&params, &prog, &mut create_rng(42));
        // Same signal on both channels, right scaled by the larger factor.
        let i = buffer.len() / 2;
        assert!((buffer.right[i] * (1.0 - STEREO_WIDTH) - buffer.left[i] * (1.0 + STEREO_WIDTH)).abs() < 1e-9);
    }

    #[test]
    fn test_starts_silent_from_crossfade_window() {
        let params = test_params(5.0);
        let prog = test_progression();
        let buffer = synthesize(&params, &prog, &mut create_rng(42));
        assert_eq!(buffer.left[0], 0.0);
        assert!(!buffer.is_silent());
    }

    #[test]
    fn test_edge_window_ramps() {
        let mut seg = vec![1.0; 10];
        apply_edge_window(&mut seg, 4);
        assert_eq!(seg[0], 0.0);
        assert_eq!(seg[9], 0.0);
        assert_eq!(seg[5], 1.0);
    }
}
