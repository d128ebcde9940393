//! Core types for the voxbeacon transmission engine.
//!
//! This crate defines the parameter and metadata types shared by the
//! synthesis engine, the audio backends, and the beacon controller:
//! cadence configuration, tone parameters, the Morse code table and
//! timing model, and recording metadata.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod cadence;
mod morse;
mod recording;
mod timing;
mod tone;

pub use cadence::{CadenceConfig, CadencePhase, PAUSE_MAX_SECS, PAUSE_MIN_SECS};
pub use morse::{char_to_morse, text_to_morse, WORD_SPACE};
pub use recording::{Recording, RecordingId};
pub use timing::{MorseTiming, WPM_MAX, WPM_MIN};
pub use tone::{ToneParams, FREQUENCY_MAX_HZ, FREQUENCY_MIN_HZ};
