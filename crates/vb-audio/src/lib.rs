//! Audio output backends and session management for voxbeacon.

mod cpal_backend;
mod session;
mod tone_stream;
mod traits;

pub use cpal_backend::CpalOutput;
pub use session::{AudioSession, SessionMode};
pub use tone_stream::ToneStream;
pub use traits::{AudioError, AudioOutput};
