//! CW identification playback.

use std::sync::mpsc::Sender;
use vb_core::{text_to_morse, MorseTiming};
use vb_engine::render_pattern;

use crate::error::BeaconError;
use crate::playback::{spawn_playback, CompletionEvent, ContentKind, PlaybackHandle};

/// Plays a text message as keyed CW on the default output device.
///
/// The waveform is rendered in full at the device sample rate before the
/// stream starts, so the writer thread only copies frames.
pub struct MorsePlayer {
    handle: Option<PlaybackHandle>,
}

impl MorsePlayer {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// True while a transmission is in progress.
    pub fn is_playing(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Start sending `text` as CW. A no-op if a transmission is already
    /// running. Completion is reported on `completion` tagged with
    /// `generation`.
    pub fn play(
        &mut self,
        text: &str,
        wpm: u8,
        frequency_hz: f32,
        amplitude: f32,
        completion: Sender<CompletionEvent>,
        generation: u64,
    ) -> Result<(), BeaconError> {
        if self.is_playing() {
            return Ok(());
        }
        if text.trim().is_empty() {
            return Err(BeaconError::EmptyText);
        }
        let pattern = text_to_morse(text);
        if pattern.is_empty() {
            return Err(BeaconError::NoMorseCharacters);
        }

        let timing = MorseTiming::from_wpm(wpm);
        let handle = spawn_playback(
            ContentKind::Morse,
            move |sample_rate| {
                render_pattern(&pattern, timing, frequency_hz, amplitude, sample_rate)
            },
            completion,
            generation,
        )?;
        self.handle = Some(handle);
        Ok(())
    }

    /// Cut the transmission immediately. Idempotent.
    pub fn stop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop();
        }
    }
}

impl Default for MorsePlayer {
    fn default() -> Self {
        Self::new()
    }
}
