//! WAV encoding and decoding for voxbeacon voice clips.
//!
//! Recorded messages are stored as plain PCM WAV files; this crate turns
//! them into frame buffers for the message player and writes rendered
//! transmissions back out for export.

mod wav_format;

pub use wav_format::{frames_to_wav, load_wav, write_wav, VoiceClip};

/// Error type for clip parsing.
#[derive(Debug)]
pub enum FormatError {
    /// Invalid file header or magic bytes
    InvalidHeader,
    /// Unexpected end of file
    UnexpectedEof,
    /// Unsupported encoding (only 8/16-bit mono/stereo PCM)
    UnsupportedFormat,
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::InvalidHeader => write!(f, "invalid WAV header"),
            FormatError::UnexpectedEof => write!(f, "unexpected end of file"),
            FormatError::UnsupportedFormat => write!(f, "unsupported WAV encoding"),
        }
    }
}

impl std::error::Error for FormatError {}
