//! Plucked arpeggio voice.
//!
//! An eighth-note step sequencer over the chord progression. Each step picks
//! a chord tone uniformly at random while the chord itself advances once per
//! step, so tones are not cycled systematically; that looseness is part of
//! the sound. Plucks are short decaying sines, panned by a slow LFO sampled
//! at each pluck's start.

use std::f64::consts::TAU;

use rand::Rng;
use rand_pcg::Pcg32;

use crate::dsp::StereoBuffer;
use crate::params::RenderParams;
use crate::theory::{midi_to_freq, Progression};

/// Pluck length in seconds.
const PLUCK_LEN: f64 = 0.6;
/// Exponential decay time constant in seconds.
const PLUCK_DECAY: f64 = 0.25;
/// Pluck amplitude.
const PLUCK_AMP: f64 = 0.12;
/// Pan LFO rate in Hz.
const PAN_RATE: f64 = 0.02;
/// Pan center and spread: gains are center -/+ depth * lfo.
const PAN_CENTER: f64 = 0.6;
const PAN_DEPTH: f64 = 0.4;

/// Renders the arpeggio voice over the whole track length.
pub fn synthesize(params: &RenderParams, progression: &Progression, rng: &mut Pcg32) -> StereoBuffer {
    let n = params.num_samples();
    let sr = params.sample_rate as f64;
    let mut out = StereoBuffer::silence(n);

    // Eighth notes.
    let step = 30.0 / params.bpm;
    let pluck_samples = (PLUCK_LEN * sr) as usize;

    let mut tcur = 0.0;
    let mut idx = 0usize;
    while tcur < params.duration {
        let start = (tcur * sr) as usize;
        if start >= n {
            break;
        }

        let chord = progression.chord(idx);
        let pitches = chord.pitches();
        let note = pitches[rng.gen_range(0..pitches.len())];
        // Brighter octave.
        let f = midi_to_freq(note + 12.0);

        let lfo = (TAU * PAN_RATE * start as f64 / sr).sin();
        let left_gain = PAN_CENTER - PAN_DEPTH * lfo;
        let right_gain = PAN_CENTER + PAN_DEPTH * lfo;

        let end = n.min(start + pluck_samples);
        for i in 0..(end - start) {
            let t = i as f64 / sr;
            let s = PLUCK_AMP * (TAU * f * t).sin() * (-t / PLUCK_DECAY).exp();
            out.left[start + i] += s * left_gain;
            out.right[start + i] += s * right_gain;
        }

        tcur += step;
        idx += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Mode;
    use crate::rng::create_rng;
    use crate::theory::Scale;

    fn test_params() -> RenderParams {
        RenderParams {
            duration: 3.0,
            bpm: 120.0,
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
        let params = test_params();
        let buffer = synthesize(&params, &test_progression(), &mut create_rng(42));
        assert_eq!(buffer.len(), params.num_samples());
    }

    #[test]
    fn test_determinism() {
        let params = test_params();
        let prog = test_progression();
        let a = synthesize(&params, &prog, &mut create_rng(42));
        let b = synthesize(&params, &prog, &mut create_rng(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_note_choice_depends_on_seed() {
        let params = test_params();
        let prog = test_progression();
        let a = synthesize(&params, &prog, &mut create_rng(1));
        let b = synthesize(&params, &prog, &mut create_rng(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_first_pluck_lands_at_time_zero() {
        let params = test_params();
        let buffer = synthesize(&params, &test_progression(), &mut create_rng(42));
        // Sine pluck starts at zero but must be audible shortly after.
        assert_eq!(buffer.left[0], 0.0);
        let early_peak = buffer.left[..800].iter().fold(0.0_f64, |a, s| a.max(s.abs()));
        assert!(early_peak > 0.01);
    }

    #[test]
    fn test_pluck_decays() {
        // One isolated pluck: a single step slower than the track is long.
        let params = RenderParams {
            duration: 1.0,
            bpm: 10.0,
            sample_rate: 8000,
            ..Default::default()
        };
        let buffer = synthesize(&params, &test_progression(), &mut create_rng(42));
        let head = buffer.left[..1600].iter().fold(0.0_f64, |a, s| a.max(s.abs()));
        let tail = buffer.left[6400..].iter().fold(0.0_f64, |a, s| a.max(s.abs()));
        assert!(tail < head * 0.2);
    }
}
