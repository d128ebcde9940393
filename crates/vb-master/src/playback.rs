//! Buffer playback thread shared by the CW and message paths.
//!
//! cpal streams are not `Send`, so the device, stream, and ring buffer
//! all live on a dedicated writer thread. Setup errors are handed back
//! to the caller synchronously over a handshake channel before `play`
//! returns; natural completion is reported asynchronously over the
//! controller's completion channel and gated there by generation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;
use vb_audio::{AudioOutput, CpalOutput};
use vb_engine::Frame;

use crate::error::BeaconError;

/// Which buffered content a playback carries; selects the error kind a
/// setup failure surfaces as. The carrier tone never goes through this
/// path, it synthesizes inside its own stream callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ContentKind {
    Morse,
    Message,
}

/// Natural-completion event sent back to the control thread.
#[derive(Clone, Copy, Debug)]
pub struct CompletionEvent {
    /// Emission generation the playback belongs to. The controller drops
    /// events from superseded generations, so a completion that lost a
    /// race with stop/start cannot be mistaken for the current one.
    pub generation: u64,
}

/// Handle to a running playback thread.
pub(crate) struct PlaybackHandle {
    stop_signal: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl PlaybackHandle {
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }

    /// Signal the writer thread and join it. Safe mid-playback.
    pub fn stop(&mut self) {
        self.stop_signal.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn setup_error(kind: ContentKind, stage: &str, message: String) -> BeaconError {
    match kind {
        ContentKind::Morse if stage == "open" => BeaconError::BufferCreationFailed(message),
        ContentKind::Morse => BeaconError::AudioFormat(message),
        _ => BeaconError::PlaybackFailed(message),
    }
}

/// Spawn a writer thread that opens the output device, builds the frame
/// buffer at the device rate via `build`, streams it, and reports
/// completion. Blocks only until device and stream setup succeed or fail.
pub(crate) fn spawn_playback<F>(
    kind: ContentKind,
    build: F,
    completion: Sender<CompletionEvent>,
    generation: u64,
) -> Result<PlaybackHandle, BeaconError>
where
    F: FnOnce(u32) -> Vec<Frame> + Send + 'static,
{
    let stop_signal = Arc::new(AtomicBool::new(false));
    let finished = Arc::new(AtomicBool::new(false));
    let (setup_tx, setup_rx) = mpsc::channel::<Result<(), BeaconError>>();

    let stop = stop_signal.clone();
    let done = finished.clone();

    let thread = std::thread::spawn(move || {
        let (mut output, consumer) = match CpalOutput::new() {
            Ok(pair) => pair,
            Err(e) => {
                let _ = setup_tx.send(Err(setup_error(kind, "open", e.to_string())));
                done.store(true, Ordering::Relaxed);
                return;
            }
        };

        let frames = build(output.sample_rate());

        if let Err(e) = output.build_stream(consumer) {
            let _ = setup_tx.send(Err(setup_error(kind, "stream", e.to_string())));
            done.store(true, Ordering::Relaxed);
            return;
        }
        if let Err(e) = output.start() {
            let _ = setup_tx.send(Err(setup_error(kind, "stream", e.to_string())));
            done.store(true, Ordering::Relaxed);
            return;
        }
        let _ = setup_tx.send(Ok(()));

        for frame in frames {
            if stop.load(Ordering::Relaxed) {
                break;
            }
            output.write_spin(frame);
        }

        let completed = !stop.load(Ordering::Relaxed);
        if completed {
            // Let the tail drain through the device before teardown
            output.flush_tail(0.05);
        }
        let _ = output.stop();
        done.store(true, Ordering::Relaxed);
        if completed {
            let _ = completion.send(CompletionEvent { generation });
        }
    });

    match setup_rx.recv() {
        Ok(Ok(())) => Ok(PlaybackHandle {
            stop_signal,
            finished,
            thread: Some(thread),
        }),
        Ok(Err(e)) => {
            let _ = thread.join();
            Err(e)
        }
        Err(_) => {
            let _ = thread.join();
            Err(BeaconError::PlaybackFailed(
                "playback thread exited during setup".into(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn morse_open_failure_maps_to_buffer_creation() {
        let err = setup_error(ContentKind::Morse, "open", "boom".into());
        assert!(matches!(err, BeaconError::BufferCreationFailed(_)));
    }

    #[test]
    fn morse_stream_failure_maps_to_audio_format() {
        let err = setup_error(ContentKind::Morse, "stream", "boom".into());
        assert!(matches!(err, BeaconError::AudioFormat(_)));
    }

    #[test]
    fn message_failures_map_to_playback_failed() {
        for stage in ["open", "stream"] {
            let err = setup_error(ContentKind::Message, stage, "boom".into());
            assert!(matches!(err, BeaconError::PlaybackFailed(_)));
        }
    }
}
