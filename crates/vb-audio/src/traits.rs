//! Audio output trait and error types.

/// Error type for audio operations.
#[derive(Debug)]
pub enum AudioError {
    /// Output device could not be opened or configured
    DeviceInit(String),
    /// Output stream could not be built
    StreamCreate(String),
    /// Stream refused to play or pause
    Playback(String),
    /// No usable audio device present
    NoDevice,
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::DeviceInit(msg) => write!(f, "could not open output device: {}", msg),
            AudioError::StreamCreate(msg) => write!(f, "could not build output stream: {}", msg),
            AudioError::Playback(msg) => write!(f, "stream playback failed: {}", msg),
            AudioError::NoDevice => write!(f, "no usable audio device"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Trait for audio output backends.
pub trait AudioOutput {
    /// Get the sample rate.
    fn sample_rate(&self) -> u32;

    /// Start playback.
    fn start(&mut self) -> Result<(), AudioError>;

    /// Stop playback.
    fn stop(&mut self) -> Result<(), AudioError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_carry_their_cause() {
        let err = AudioError::StreamCreate("format not supported".into());
        assert!(err.to_string().contains("format not supported"));
        assert_eq!(AudioError::NoDevice.to_string(), "no usable audio device");
    }
}
