//! The render pipeline: parameters in, finished stereo buffer out.
//!
//! Voices are synthesized independently from per-voice random streams and
//! combined additively at the caller's mix levels, then the whole track is
//! faded in/out and peak-normalized to the headroom target. The pipeline is
//! single-threaded; the per-voice seed derivation already guarantees that a
//! parallel implementation would produce identical output.

use crate::dsp::{fade_in_out, normalize_stereo_peak, StereoBuffer};
use crate::error::EngineResult;
use crate::params::RenderParams;
use crate::rng::create_voice_rng;
use crate::theory::{Progression, Scale};
use crate::voices::{arp, ocean, pad, percussion};

/// Normalization target peak (~ -1 dBFS).
pub const MIX_HEADROOM: f64 = 0.9;

/// Renders a complete track.
///
/// Validates the parameters, derives the chord progression, synthesizes the
/// four voices, and mixes
/// `pad_level * pad + ocean_level * ocean + arp_level * arp + percussion`
/// (percussion bakes its own level in). When `params.seed` is set the output
/// is bit-identical across runs; otherwise a master seed is drawn from OS
/// entropy once and used for the whole render.
pub fn render(params: &RenderParams) -> EngineResult<StereoBuffer> {
    params.validate()?;

    let scale = Scale::build(&params.key, params.mode)?;
    let progression = Progression::build(&scale, params.mode);

    let master_seed = params.seed.unwrap_or_else(rand::random);
    let n = params.num_samples();

    let pad = pad::synthesize(
        params,
        &progression,
        &mut create_voice_rng(master_seed, "pad"),
    );
    let ocean = ocean::synthesize(params, &mut create_voice_rng(master_seed, "ocean"));
    let arp = if params.arp_enabled {
        arp::synthesize(
            params,
            &progression,
            &mut create_voice_rng(master_seed, "arp"),
        )
    } else {
        StereoBuffer::silence(n)
    };
    let perc = percussion::synthesize(params, &mut create_voice_rng(master_seed, "percussion"));

    let mut out = StereoBuffer::silence(n);
    out.add_scaled(&pad, params.pad_level);
    out.add_scaled(&ocean, params.ocean_level);
    out.add_scaled(&arp, params.arp_level);
    out.add_scaled(&perc, 1.0);

    fade_in_out(&mut out.left, params.fade, params.fade, params.sample_rate);
    fade_in_out(&mut out.right, params.fade, params.fade, params.sample_rate);
    normalize_stereo_peak(&mut out, MIX_HEADROOM);

    Ok(out)
}
