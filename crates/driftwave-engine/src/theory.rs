//! Music theory model: scales, triads, and chord progressions.
//!
//! Pitches are real-valued MIDI note numbers so that cent-level detuning
//! stays in pitch space until the final conversion to Hz.

use crate::error::{EngineError, EngineResult};
use crate::params::Mode;

/// Enharmonic table mapping key names to octave-4 root pitches (C4 = 60).
const KEY_ROOTS: &[(&str, f64)] = &[
    ("C", 60.0),
    ("C#", 61.0),
    ("DB", 61.0),
    ("D", 62.0),
    ("D#", 63.0),
    ("EB", 63.0),
    ("E", 64.0),
    ("F", 65.0),
    ("F#", 66.0),
    ("GB", 66.0),
    ("G", 67.0),
    ("G#", 68.0),
    ("AB", 68.0),
    ("A", 69.0),
    ("A#", 70.0),
    ("BB", 70.0),
    ("B", 71.0),
];

/// Semitone steps of the major scale.
const MAJOR_STEPS: [f64; 7] = [0.0, 2.0, 4.0, 5.0, 7.0, 9.0, 11.0];

/// Semitone steps of the natural minor scale.
const MINOR_STEPS: [f64; 7] = [0.0, 2.0, 3.0, 5.0, 7.0, 8.0, 10.0];

/// Chord progression templates as 1-based scale degrees.
const MINOR_PROGRESSION: [usize; 4] = [1, 6, 7, 4];
const MAJOR_PROGRESSION: [usize; 4] = [1, 5, 6, 4];

/// Converts a (possibly fractional) MIDI note number to frequency in Hz.
///
/// Uses the standard equal-temperament formula f = 440 * 2^((n-69)/12),
/// where 69 is A4.
pub fn midi_to_freq(pitch: f64) -> f64 {
    440.0 * 2.0_f64.powf((pitch - 69.0) / 12.0)
}

/// A diatonic scale: seven pitches anchored at octave 4.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    degrees: [f64; 7],
}

impl Scale {
    /// Builds the scale for a key name and mode.
    ///
    /// Key names are case-insensitive and may use sharps or flats ("C#" and
    /// "Db" are the same root). Unknown names fail with
    /// [`EngineError::UnknownKey`].
    pub fn build(key: &str, mode: Mode) -> EngineResult<Self> {
        let name = key.to_ascii_uppercase();
        let root = KEY_ROOTS
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, root)| *root)
            .ok_or_else(|| EngineError::unknown_key(key))?;

        let steps = match mode {
            Mode::Major => MAJOR_STEPS,
            Mode::Minor => MINOR_STEPS,
        };
        let mut degrees = [0.0; 7];
        for (degree, step) in degrees.iter_mut().zip(steps) {
            *degree = root + step;
        }
        Ok(Self { degrees })
    }

    /// Pitch at a 0-based scale index, wrapped mod 7.
    pub fn pitch(&self, index: usize) -> f64 {
        self.degrees[index % 7]
    }

    /// All seven pitches in ascending order.
    pub fn degrees(&self) -> &[f64; 7] {
        &self.degrees
    }
}

/// A triad: root, third, and fifth drawn from a scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chord {
    /// Root pitch.
    pub root: f64,
    /// Third pitch.
    pub third: f64,
    /// Fifth pitch.
    pub fifth: f64,
}

impl Chord {
    /// Builds the triad on a 1-based scale degree, wrapped mod 7.
    ///
    /// In minor mode the chord on the 5th degree has its third raised a
    /// semitone (the dominant-major convention). No other degree/mode
    /// combination is special-cased.
    pub fn from_degree(scale: &Scale, degree: usize, mode: Mode) -> Self {
        let i = (degree - 1) % 7;
        let mut third = scale.pitch(i + 2);
        if mode.is_minor() && degree == 5 {
            third += 1.0;
        }
        Self {
            root: scale.pitch(i),
            third,
            fifth: scale.pitch(i + 4),
        }
    }

    /// The three pitches in stacked order.
    pub fn pitches(&self) -> [f64; 3] {
        [self.root, self.third, self.fifth]
    }
}

/// A cyclic four-chord progression driving the pad and arpeggio voices.
#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
    chords: Vec<Chord>,
}

impl Progression {
    /// Builds the fixed progression for the mode: degrees 1-6-7-4 in minor,
    /// 1-5-6-4 in major.
    pub fn build(scale: &Scale, mode: Mode) -> Self {
        let template = match mode {
            Mode::Major => MAJOR_PROGRESSION,
            Mode::Minor => MINOR_PROGRESSION,
        };
        let chords = template
            .iter()
            .map(|&degree| Chord::from_degree(scale, degree, mode))
            .collect();
        Self { chords }
    }

    /// Chord at a cyclic position.
    pub fn chord(&self, index: usize) -> &Chord {
        &self.chords[index % self.chords.len()]
    }

    /// Number of chords before the cycle repeats.
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    /// Returns true if the progression holds no chords.
    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_midi_to_freq_a4() {
        assert!((midi_to_freq(69.0) - 440.0).abs() < 1e-9);
        assert!((midi_to_freq(57.0) - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_midi_to_freq_fractional_pitch() {
        // One cent above A4.
        let f = midi_to_freq(69.01);
        assert!(f > 440.0 && f < 440.3);
    }

    #[test]
    fn test_c_major_scale() {
        let scale = Scale::build("C", Mode::Major).unwrap();
        let expected = [60.0, 62.0, 64.0, 65.0, 67.0, 69.0, 71.0];
        assert_eq!(*scale.degrees(), expected);
    }

    #[test]
    fn test_a_minor_scale() {
        let scale = Scale::build("A", Mode::Minor).unwrap();
        let expected = [69.0, 71.0, 72.0, 74.0, 76.0, 77.0, 79.0];
        assert_eq!(*scale.degrees(), expected);
    }

    #[test]
    fn test_enharmonic_aliases() {
        for mode in [Mode::Major, Mode::Minor] {
            let sharp = Scale::build("C#", mode).unwrap();
            let flat = Scale::build("Db", mode).unwrap();
            assert_eq!(sharp, flat);
        }
    }

    #[test]
    fn test_key_lookup_is_case_insensitive() {
        let upper = Scale::build("EB", Mode::Minor).unwrap();
        let lower = Scale::build("eb", Mode::Minor).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_unknown_key() {
        let err = Scale::build("H", Mode::Major).unwrap_err();
        assert!(matches!(err, EngineError::UnknownKey { .. }));
    }

    #[test]
    fn test_tonic_triad() {
        let scale = Scale::build("C", Mode::Major).unwrap();
        let chord = Chord::from_degree(&scale, 1, Mode::Major);
        assert_eq!(chord.pitches(), [60.0, 64.0, 67.0]);
    }

    #[test]
    fn test_minor_dominant_raised_third() {
        let scale = Scale::build("A", Mode::Minor).unwrap();
        let five = Chord::from_degree(&scale, 5, Mode::Minor);
        // E-G-B stacked thirds, with G raised to G#.
        assert_eq!(five.pitches(), [76.0, 80.0, 71.0]);

        // Only the 5th degree is special-cased.
        let four = Chord::from_degree(&scale, 4, Mode::Minor);
        assert_eq!(four.pitches(), [74.0, 77.0, 69.0]);
    }

    #[test]
    fn test_degree_wraps_mod_seven() {
        let scale = Scale::build("C", Mode::Major).unwrap();
        let one = Chord::from_degree(&scale, 1, Mode::Major);
        let eight = Chord::from_degree(&scale, 8, Mode::Major);
        assert_eq!(one, eight);
    }

    #[test]
    fn test_progression_templates() {
        let scale = Scale::build("A", Mode::Minor).unwrap();
        let prog = Progression::build(&scale, Mode::Minor);
        assert_eq!(prog.len(), 4);
        assert_eq!(*prog.chord(0), Chord::from_degree(&scale, 1, Mode::Minor));
        assert_eq!(*prog.chord(1), Chord::from_degree(&scale, 6, Mode::Minor));
        assert_eq!(*prog.chord(2), Chord::from_degree(&scale, 7, Mode::Minor));
        assert_eq!(*prog.chord(3), Chord::from_degree(&scale, 4, Mode::Minor));
        // Cyclic access.
        assert_eq!(prog.chord(4), prog.chord(0));

        let scale = Scale::build("C", Mode::Major).unwrap();
        let prog = Progression::build(&scale, Mode::Major);
        assert_eq!(*prog.chord(1), Chord::from_degree(&scale, 5, Mode::Major));
    }
}
