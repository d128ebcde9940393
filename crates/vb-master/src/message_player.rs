//! Recorded voice message playback.

use std::fs;
use std::sync::mpsc::Sender;
use vb_core::Recording;
use vb_engine::Frame;
use vb_formats::load_wav;

use crate::error::BeaconError;
use crate::playback::{spawn_playback, CompletionEvent, ContentKind, PlaybackHandle};

/// Plays a stored voice recording on the default output device.
pub struct MessagePlayer {
    handle: Option<PlaybackHandle>,
}

impl MessagePlayer {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// True while a message is in progress.
    pub fn is_playing(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Start playing `recording`. A no-op if a message is already
    /// running. The clip is resampled from its native rate to the device
    /// rate on the writer thread before streaming begins.
    pub fn play(
        &mut self,
        recording: &Recording,
        completion: Sender<CompletionEvent>,
        generation: u64,
    ) -> Result<(), BeaconError> {
        if self.is_playing() {
            return Ok(());
        }

        let data = fs::read(&recording.file_ref)
            .map_err(|_| BeaconError::FileNotFound(recording.file_ref.clone()))?;
        let clip = load_wav(&data).map_err(|e| BeaconError::PlaybackFailed(e.to_string()))?;

        let handle = spawn_playback(
            ContentKind::Message,
            move |device_rate| resample(&clip.frames, clip.sample_rate, device_rate),
            completion,
            generation,
        )?;
        self.handle = Some(handle);
        Ok(())
    }

    /// Cut the message immediately. Idempotent.
    pub fn stop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop();
        }
    }
}

impl Default for MessagePlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Nearest-neighbor resample using a 16.16 fixed-point position, so the
/// step stays exact across arbitrarily long clips.
fn resample(frames: &[Frame], source_rate: u32, target_rate: u32) -> Vec<Frame> {
    if frames.is_empty() || source_rate == 0 || target_rate == 0 {
        return Vec::new();
    }
    if source_rate == target_rate {
        return frames.to_vec();
    }

    let increment = ((source_rate as u64) << 16) / target_rate as u64;
    let out_len = ((frames.len() as u64) << 16) / increment;
    let mut out = Vec::with_capacity(out_len as usize);

    let mut position: u64 = 0;
    while (position >> 16) < frames.len() as u64 {
        out.push(frames[(position >> 16) as usize]);
        position += increment;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn missing_file_is_reported() {
        let mut player = MessagePlayer::new();
        let recording = Recording {
            name: "gone".into(),
            duration_secs: 1.0,
            created_at: 0,
            file_ref: "/nonexistent/clip.wav".into(),
        };
        let (tx, _rx) = mpsc::channel();
        let err = player.play(&recording, tx, 1).unwrap_err();
        assert!(matches!(err, BeaconError::FileNotFound(_)));
    }

    #[test]
    fn resample_identity_at_same_rate() {
        let frames = vec![Frame::mono(1), Frame::mono(2), Frame::mono(3)];
        assert_eq!(resample(&frames, 8000, 8000), frames);
    }

    #[test]
    fn upsampling_doubles_length() {
        let frames = vec![Frame::mono(7); 1000];
        let out = resample(&frames, 22050, 44100);
        assert_eq!(out.len(), 2000);
        assert!(out.iter().all(|f| f.left == 7));
    }

    #[test]
    fn downsampling_halves_length() {
        let frames = vec![Frame::silence(); 1000];
        let out = resample(&frames, 44100, 22050);
        assert_eq!(out.len(), 500);
    }

    #[test]
    fn resample_of_empty_clip_is_empty() {
        assert!(resample(&[], 44100, 48000).is_empty());
    }
}
