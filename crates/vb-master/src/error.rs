//! Beacon error surface.

use vb_audio::AudioError;

/// Error type for beacon operations.
///
/// Every failure is surfaced once to the caller as the controller's
/// "last error"; nothing is retried automatically and nothing crosses
/// the realtime audio callback.
#[derive(Debug)]
pub enum BeaconError {
    /// CW text was empty
    EmptyText,
    /// CW text contained no characters with a Morse representation
    NoMorseCharacters,
    /// Audio output or buffer could not be set up for CW playback
    BufferCreationFailed(String),
    /// Audio stream rejected the rendered CW buffer
    AudioFormat(String),
    /// Backing file for a recording is absent
    FileNotFound(String),
    /// Message playback could not be decoded or started
    PlaybackFailed(String),
    /// Audio session configuration error
    Session(AudioError),
}

impl std::fmt::Display for BeaconError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BeaconError::EmptyText => write!(f, "no text to send"),
            BeaconError::NoMorseCharacters => {
                write!(f, "text contains no Morse-encodable characters")
            }
            BeaconError::BufferCreationFailed(msg) => {
                write!(f, "could not create audio buffer: {}", msg)
            }
            BeaconError::AudioFormat(msg) => write!(f, "audio format error: {}", msg),
            BeaconError::FileNotFound(path) => write!(f, "recording file not found: {}", path),
            BeaconError::PlaybackFailed(msg) => write!(f, "playback failed: {}", msg),
            BeaconError::Session(err) => write!(f, "audio session error: {}", err),
        }
    }
}

impl std::error::Error for BeaconError {}

impl From<AudioError> for BeaconError {
    fn from(err: AudioError) -> Self {
        BeaconError::Session(err)
    }
}
