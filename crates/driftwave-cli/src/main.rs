//! driftwave - procedural ambient soundtrack generator
//!
//! Renders a finished stereo WAV (and optionally an MP3 sibling when ffmpeg
//! is available) from a duration, tempo, key/mode, and mix-level knobs.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;

use driftwave_engine::{render, EncodeOutcome, Mode, Mp3Encoder, RenderParams, WavResult};

/// Generate a royalty-free ambient soundtrack (WAV/MP3)
#[derive(Parser, Debug)]
#[command(name = "driftwave")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Track duration in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Arpeggio/percussion tempo in BPM
    #[arg(long)]
    bpm: Option<f64>,

    /// Key (A, C#, Eb, ...)
    #[arg(long)]
    key: Option<String>,

    /// Mode (major or minor)
    #[arg(long, value_parser = parse_mode)]
    mode: Option<Mode>,

    /// Fade in/out length in seconds
    #[arg(long)]
    fade: Option<f64>,

    /// Random seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Output sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Pad layer level (0..2)
    #[arg(long)]
    pad_level: Option<f64>,

    /// Ocean noise level (0..2)
    #[arg(long)]
    ocean_level: Option<f64>,

    /// Arpeggio level (0..2)
    #[arg(long)]
    arp_level: Option<f64>,

    /// Percussion level (0..1, 0 disables the voice)
    #[arg(long)]
    percussion_level: Option<f64>,

    /// Disable the arpeggio layer entirely
    #[arg(long)]
    no_arp: bool,

    /// Pad brightness tilt (0..1)
    #[arg(long)]
    bright: Option<f64>,

    /// Load render parameters from a JSON preset (flags override it)
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "out/music")]
    out_dir: PathBuf,

    /// Also export MP3 if ffmpeg is available
    #[arg(long)]
    mp3: bool,
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse::<Mode>().map_err(|e| e.to_string())
}

impl Cli {
    /// Builds render parameters: preset (if any) under defaults, explicit
    /// flags on top.
    fn to_params(&self) -> Result<RenderParams> {
        let mut params = match &self.preset {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading preset {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing preset {}", path.display()))?
            }
            None => RenderParams::default(),
        };

        if let Some(v) = self.duration {
            params.duration = v;
        }
        if let Some(v) = self.bpm {
            params.bpm = v;
        }
        if let Some(v) = &self.key {
            params.key = v.clone();
        }
        if let Some(v) = self.mode {
            params.mode = v;
        }
        if let Some(v) = self.fade {
            params.fade = v;
        }
        if let Some(v) = self.seed {
            params.seed = Some(v);
        }
        if let Some(v) = self.sample_rate {
            params.sample_rate = v;
        }
        if let Some(v) = self.pad_level {
            params.pad_level = v;
        }
        if let Some(v) = self.ocean_level {
            params.ocean_level = v;
        }
        if let Some(v) = self.arp_level {
            params.arp_level = v;
        }
        if let Some(v) = self.percussion_level {
            params.percussion_level = v;
        }
        if self.no_arp {
            params.arp_enabled = false;
        }
        if let Some(v) = self.bright {
            params.brightness = v;
        }
        Ok(params)
    }
}

/// Artifact base name: timestamp, duration, key, mode tag, tempo.
fn artifact_base(params: &RenderParams) -> String {
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let mode_tag = if params.mode.is_minor() { "m" } else { "M" };
    format!(
        "ambient_{ts}_dur{}s_{}{}_bpm{}",
        params.duration as u64, params.key, mode_tag, params.bpm as u64
    )
}

fn run(cli: &Cli) -> Result<()> {
    let params = cli.to_params()?;
    let started = Instant::now();

    let buffer = render(&params).context("render failed")?;
    let wav = WavResult::from_buffer(&buffer, params.sample_rate);

    let wav_path = cli.out_dir.join(format!("{}.wav", artifact_base(&params)));
    wav.write_to(&wav_path)
        .with_context(|| format!("writing {}", wav_path.display()))?;
    println!(
        "{} wrote {} ({:.1}s of audio)",
        "[music]".green(),
        wav_path.display(),
        wav.duration_seconds()
    );

    if cli.mp3 {
        match Mp3Encoder::new().encode(&wav_path) {
            Ok(EncodeOutcome::Encoded(mp3_path)) => {
                println!("{} wrote {}", "[music]".green(), mp3_path.display());
            }
            Ok(EncodeOutcome::Unavailable) => {
                eprintln!(
                    "{} ffmpeg not found - skipping MP3 encode (WAV is fine)",
                    "[music]".yellow()
                );
            }
            Err(err) => {
                eprintln!("{} MP3 encode failed: {err} (WAV is fine)", "[music]".yellow());
            }
        }
    }

    println!(
        "{} done in {:.1}s",
        "[music]".green(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "[music]".red());
            ExitCode::FAILURE
        }
    }
}
