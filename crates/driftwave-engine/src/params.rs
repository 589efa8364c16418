//! Render parameters.
//!
//! A render is configured entirely through an immutable [`RenderParams`]
//! value constructed once per call. There is no process-wide state: the
//! default sample rate and mix headroom are ordinary constants consumed
//! through the params or the render pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Diatonic mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Major (Ionian) mode.
    Major,
    /// Natural minor (Aeolian) mode.
    Minor,
}

impl Mode {
    /// Returns true for the minor mode.
    pub fn is_minor(&self) -> bool {
        matches!(self, Mode::Minor)
    }
}

impl FromStr for Mode {
    type Err = EngineError;

    /// Parses a mode name, matched case-insensitively by prefix
    /// (`"maj"` / `"min"`).
    fn from_str(s: &str) -> EngineResult<Self> {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("maj") {
            Ok(Mode::Major)
        } else if lower.starts_with("min") {
            Ok(Mode::Minor)
        } else {
            Err(EngineError::invalid_param(
                "mode",
                format!("unrecognized mode '{s}' (expected major or minor)"),
            ))
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Major => write!(f, "major"),
            Mode::Minor => write!(f, "minor"),
        }
    }
}

/// Configuration for a single render call.
///
/// Constructed once, validated before synthesis begins, and never mutated
/// while rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// Track duration in seconds.
    pub duration: f64,
    /// Tempo in beats per minute (drives the arpeggio and percussion).
    pub bpm: f64,
    /// Key name, e.g. "A", "C#", "Eb". Case-insensitive.
    pub key: String,
    /// Major or natural minor.
    pub mode: Mode,
    /// Global fade in/out length in seconds.
    pub fade: f64,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Master random seed. `None` renders non-deterministically.
    pub seed: Option<u64>,
    /// Pad voice mix level (typically 0..2).
    pub pad_level: f64,
    /// Ocean voice mix level (typically 0..2).
    pub ocean_level: f64,
    /// Arpeggio voice mix level (typically 0..2).
    pub arp_level: f64,
    /// Percussion level (0..1); at or near zero the voice is disabled.
    pub percussion_level: f64,
    /// Whether the arpeggio voice renders at all.
    pub arp_enabled: bool,
    /// Pad brightness tilt amount (0..1).
    pub brightness: f64,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            duration: 75.0,
            bpm: 84.0,
            key: "A".to_string(),
            mode: Mode::Minor,
            fade: 2.0,
            sample_rate: DEFAULT_SAMPLE_RATE,
            seed: None,
            pad_level: 1.0,
            ocean_level: 1.0,
            arp_level: 0.35,
            percussion_level: 0.0,
            arp_enabled: true,
            brightness: 0.4,
        }
    }
}

impl RenderParams {
    /// Number of samples per channel for this configuration.
    pub fn num_samples(&self) -> usize {
        (self.duration * self.sample_rate as f64).round() as usize
    }

    /// Validates every parameter domain before synthesis begins.
    ///
    /// The key name itself is resolved later by the theory model, which
    /// reports [`EngineError::UnknownKey`] on failure.
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.duration > 0.0) {
            return Err(EngineError::invalid_param(
                "duration",
                format!("must be positive, got {}", self.duration),
            ));
        }
        if !(self.bpm > 0.0) {
            return Err(EngineError::invalid_param(
                "bpm",
                format!("must be positive, got {}", self.bpm),
            ));
        }
        if self.sample_rate == 0 {
            return Err(EngineError::invalid_param("sample_rate", "must be positive"));
        }
        if self.fade < 0.0 || !self.fade.is_finite() {
            return Err(EngineError::invalid_param(
                "fade",
                format!("must be >= 0 seconds, got {}", self.fade),
            ));
        }
        if self.fade > self.duration / 2.0 {
            return Err(EngineError::invalid_param(
                "fade",
                format!(
                    "fade of {}s does not fit twice into a {}s track",
                    self.fade, self.duration
                ),
            ));
        }
        for (name, value) in [
            ("pad_level", self.pad_level),
            ("ocean_level", self.ocean_level),
            ("arp_level", self.arp_level),
            ("percussion_level", self.percussion_level),
            ("brightness", self.brightness),
        ] {
            if !value.is_finite() {
                return Err(EngineError::invalid_param(name, "must be finite"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(RenderParams::default().validate().is_ok());
    }

    #[test]
    fn test_mode_prefix_parse() {
        assert_eq!("major".parse::<Mode>().unwrap(), Mode::Major);
        assert_eq!("MAJ".parse::<Mode>().unwrap(), Mode::Major);
        assert_eq!("minor".parse::<Mode>().unwrap(), Mode::Minor);
        assert_eq!("Min".parse::<Mode>().unwrap(), Mode::Minor);
        assert!("dorian".parse::<Mode>().is_err());
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let params = RenderParams {
            duration: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(EngineError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_bpm() {
        let params = RenderParams {
            bpm: -10.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_fade() {
        let params = RenderParams {
            duration: 10.0,
            fade: 6.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_num_samples_rounding() {
        let params = RenderParams {
            duration: 10.0,
            sample_rate: 44_100,
            ..Default::default()
        };
        assert_eq!(params.num_samples(), 441_000);
    }

    #[test]
    fn test_preset_round_trip() {
        let params = RenderParams {
            seed: Some(7),
            key: "Eb".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&params).unwrap();
        let back: RenderParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, Some(7));
        assert_eq!(back.key, "Eb");
        assert_eq!(back.mode, Mode::Minor);
    }
}
