//! Process-wide audio session state with explicit mode transitions.
//!
//! Playback and recording configurations are mutually exclusive and
//! switching between them is not reentrant-safe if overlapped: the
//! session deactivates the prior mode, pauses briefly to let the device
//! settle, then activates the new one. Callers own the serialization —
//! one session object, driven from the control thread.

use cpal::traits::HostTrait;
use std::thread;
use std::time::Duration;

use crate::traits::AudioError;

/// Which device configuration is currently active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionMode {
    #[default]
    Inactive,
    Playback,
    Recording,
}

/// Audio session resource manager.
pub struct AudioSession {
    mode: SessionMode,
    settle: Duration,
}

impl AudioSession {
    pub fn new() -> Self {
        Self {
            mode: SessionMode::Inactive,
            settle: Duration::from_millis(20),
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Activate playback mode. Must precede any synthesizer or player
    /// start. No-op if playback is already active.
    pub fn configure_for_playback(&mut self) -> Result<(), AudioError> {
        self.switch_to(SessionMode::Playback)
    }

    /// Activate recording mode. Mutually exclusive with playback.
    pub fn configure_for_recording(&mut self) -> Result<(), AudioError> {
        self.switch_to(SessionMode::Recording)
    }

    /// Release the active configuration. Idempotent.
    pub fn deactivate(&mut self) {
        self.mode = SessionMode::Inactive;
    }

    fn switch_to(&mut self, target: SessionMode) -> Result<(), AudioError> {
        if self.mode == target {
            return Ok(());
        }
        if self.mode != SessionMode::Inactive {
            self.deactivate();
            thread::sleep(self.settle);
        }

        let host = cpal::default_host();
        let available = match target {
            SessionMode::Playback => host.default_output_device().is_some(),
            SessionMode::Recording => host.default_input_device().is_some(),
            SessionMode::Inactive => true,
        };
        if !available {
            return Err(AudioError::NoDevice);
        }

        self.mode = target;
        Ok(())
    }
}

impl Default for AudioSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive() {
        assert_eq!(AudioSession::new().mode(), SessionMode::Inactive);
    }

    #[test]
    fn deactivate_is_idempotent() {
        let mut session = AudioSession::new();
        session.deactivate();
        session.deactivate();
        assert_eq!(session.mode(), SessionMode::Inactive);
    }
}
