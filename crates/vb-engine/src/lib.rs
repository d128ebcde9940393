//! Waveform synthesis engine for the voxbeacon transmitter.
//!
//! Generates the audio the beacon emits: a continuous envelope-free sine
//! carrier for tone mode, and finite envelope-shaped Morse buffers for CW
//! mode. All rendering is pure sample arithmetic; device I/O lives in
//! `vb-audio`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod envelope;
mod frame;
pub mod morse;
mod oscillator;

pub use envelope::{burst_gain, raised_cosine, RAMP_SECS};
pub use frame::Frame;
pub use morse::{pattern_duration_secs, pattern_samples, render_pattern, segments, Segment};
pub use oscillator::Oscillator;
