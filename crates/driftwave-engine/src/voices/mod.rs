//! The four voice synthesizers.
//!
//! Each voice renders a full-length [`crate::dsp::StereoBuffer`] on its own,
//! reading only the immutable render parameters and chord progression plus
//! its private random stream. Voices have no data dependency on each other;
//! the render pipeline combines them afterwards.

pub mod arp;
pub mod ocean;
pub mod pad;
pub mod percussion;
