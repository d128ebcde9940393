//! Headless beacon controller.
//!
//! `BeaconController` ties the cadence machine to the three content
//! sources (carrier tone, CW, recorded message) and owns the audio
//! session. All methods run on one control thread; completion events
//! from playback threads arrive over a channel and are folded in by
//! [`BeaconController::poll`], which the owner pumps at roughly the
//! cadence tick interval.

mod cadence;
mod error;
mod message_player;
mod morse_player;
mod playback;
mod store;

pub use cadence::{CadenceAction, CadenceActions, CadenceEngine, TICK_INTERVAL};
pub use error::BeaconError;
pub use message_player::MessagePlayer;
pub use morse_player::MorsePlayer;
pub use playback::CompletionEvent;
pub use store::RecordingStore;

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use vb_audio::{AudioSession, ToneStream};
use vb_core::{
    text_to_morse, CadenceConfig, CadencePhase, MorseTiming, Recording, RecordingId, ToneParams,
    WPM_MAX, WPM_MIN,
};
use vb_engine::render_pattern;
use vb_formats::{frames_to_wav, load_wav};

/// Shortest allowed tone burst, in seconds.
pub const BURST_MIN_SECS: f32 = 0.1;

/// What the beacon transmits during each emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeaconMode {
    /// Fixed-length sine carrier burst.
    Tone,
    /// The configured text keyed as CW.
    Morse,
    /// A stored voice recording.
    Message(RecordingId),
}

/// The beacon: cadence, content sources, and session in one place.
pub struct BeaconController {
    session: AudioSession,
    cadence: CadenceEngine,
    mode: BeaconMode,
    morse_text: String,
    wpm: u8,
    tone_params: ToneParams,
    /// Tone-mode emission length; CW and message lengths come from
    /// their own content.
    burst_secs: f32,
    tone: ToneStream,
    morse: MorsePlayer,
    message: MessagePlayer,
    store: RecordingStore,
    completion_tx: Sender<CompletionEvent>,
    completion_rx: Receiver<CompletionEvent>,
    /// Bumped on every emission start; completions carrying an older
    /// generation are discarded in `poll`.
    generation: u64,
    transmit_started: Option<Instant>,
    last_error: Option<BeaconError>,
}

impl BeaconController {
    pub fn new() -> Self {
        let (completion_tx, completion_rx) = mpsc::channel();
        let tone_params = ToneParams::default();
        Self {
            session: AudioSession::new(),
            cadence: CadenceEngine::new(CadenceConfig::default()),
            mode: BeaconMode::Tone,
            morse_text: String::new(),
            wpm: 20,
            tone_params,
            burst_secs: 5.0,
            tone: ToneStream::new(tone_params),
            morse: MorsePlayer::new(),
            message: MessagePlayer::new(),
            store: RecordingStore::new(),
            completion_tx,
            completion_rx,
            generation: 0,
            transmit_started: None,
            last_error: None,
        }
    }

    // --- Configuration ---

    pub fn mode(&self) -> BeaconMode {
        self.mode
    }

    /// Change the content mode. Stops the beacon first if it is running,
    /// so a mode never changes under an in-flight emission.
    pub fn set_mode(&mut self, mode: BeaconMode) {
        if self.is_running() {
            self.stop();
        }
        self.mode = mode;
    }

    pub fn set_morse_text(&mut self, text: &str) {
        self.morse_text = text.to_owned();
    }

    pub fn morse_text(&self) -> &str {
        &self.morse_text
    }

    /// Set the CW speed, clamped to the supported range.
    pub fn set_wpm(&mut self, wpm: u8) {
        self.wpm = wpm.clamp(WPM_MIN, WPM_MAX);
    }

    pub fn wpm(&self) -> u8 {
        self.wpm
    }

    /// Set the tone/CW frequency. Applies immediately to a sounding
    /// carrier without a phase restart.
    pub fn set_frequency_hz(&mut self, hz: f32) {
        self.tone_params.set_frequency_hz(hz);
        self.tone.set_frequency_hz(hz);
    }

    /// Set the output amplitude, clamped to [0, 1].
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.tone_params.set_amplitude(amplitude);
        self.tone.set_amplitude(amplitude);
    }

    pub fn tone_params(&self) -> ToneParams {
        self.tone_params
    }

    /// Set the pause between transmissions, clamped to [1, 300] seconds.
    /// An in-flight wait re-reads the value on its next tick.
    pub fn set_pause_secs(&mut self, secs: f32) {
        self.cadence.config_mut().set_pause_secs(secs);
    }

    pub fn set_continuous(&mut self, continuous: bool) {
        self.cadence.config_mut().continuous = continuous;
    }

    /// Set the tone burst length, floored at [`BURST_MIN_SECS`].
    pub fn set_burst_secs(&mut self, secs: f32) {
        self.burst_secs = secs.max(BURST_MIN_SECS);
    }

    pub fn burst_secs(&self) -> f32 {
        self.burst_secs
    }

    // --- Recording catalog ---

    pub fn store(&self) -> &RecordingStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordingStore {
        &mut self.store
    }

    /// Load a WAV file's metadata and register it as a playable
    /// recording. The audio itself is decoded again at playback time.
    pub fn register_recording(&mut self, path: &str) -> Result<RecordingId, BeaconError> {
        let data =
            std::fs::read(path).map_err(|_| BeaconError::FileNotFound(path.to_owned()))?;
        let clip = load_wav(&data).map_err(|e| BeaconError::PlaybackFailed(e.to_string()))?;

        let name = std::path::Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(path)
            .to_owned();
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Ok(self.store.add(Recording {
            name,
            duration_secs: clip.duration_secs(),
            created_at,
            file_ref: path.to_owned(),
        }))
    }

    // --- Lifecycle ---

    /// Start the beacon cycle. Configures the audio session for playback
    /// and begins the first emission synchronously; setup failures abort
    /// the start and leave the beacon idle.
    pub fn start(&mut self) -> Result<(), BeaconError> {
        self.last_error = None;
        self.session.configure_for_playback()?;
        let actions = self.cadence.start();
        self.run_actions(Instant::now(), actions)
    }

    /// Stop the beacon from any phase and release the audio session.
    /// Idempotent.
    pub fn stop(&mut self) {
        let actions = self.cadence.stop();
        // run_actions cannot fail on EndEmission
        let _ = self.run_actions(Instant::now(), actions);
        self.stop_sources();
        self.transmit_started = None;
        self.session.deactivate();
    }

    /// Start when idle, stop otherwise.
    pub fn toggle(&mut self) -> Result<(), BeaconError> {
        if self.is_running() {
            self.stop();
            Ok(())
        } else {
            self.start()
        }
    }

    pub fn is_running(&self) -> bool {
        self.cadence.phase() != CadencePhase::Idle
    }

    pub fn phase(&self) -> CadencePhase {
        self.cadence.phase()
    }

    /// Seconds left in the current wait, or `None` outside Waiting.
    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        self.cadence.time_remaining(now)
    }

    /// Most recent emission failure, consumed on read.
    pub fn take_last_error(&mut self) -> Option<BeaconError> {
        self.last_error.take()
    }

    // --- Event pump ---

    /// Fold in playback completions, expire tone bursts, and advance the
    /// wait countdown. Call roughly every [`TICK_INTERVAL`].
    pub fn poll(&mut self, now: Instant) {
        let events: Vec<CompletionEvent> = self.completion_rx.try_iter().collect();
        for event in events {
            if event.generation != self.generation {
                continue;
            }
            let actions = self.cadence.content_did_finish(now);
            self.record_failure(now, actions);
        }

        if self.tone_burst_expired(now) {
            if !self.cadence.config().continuous {
                self.tone.stop();
            }
            self.transmit_started = None;
            let actions = self.cadence.content_did_finish(now);
            self.record_failure(now, actions);
        }

        let actions = self.cadence.tick(now);
        self.record_failure(now, actions);
    }

    fn tone_burst_expired(&self, now: Instant) -> bool {
        if self.mode != BeaconMode::Tone || self.cadence.phase() != CadencePhase::Transmitting {
            return false;
        }
        match self.transmit_started {
            Some(started) => now.duration_since(started).as_secs_f32() >= self.burst_secs,
            None => false,
        }
    }

    fn record_failure(&mut self, now: Instant, actions: CadenceActions) {
        if let Err(e) = self.run_actions(now, actions) {
            self.last_error = Some(e);
        }
    }

    fn run_actions(&mut self, now: Instant, actions: CadenceActions) -> Result<(), BeaconError> {
        for action in actions {
            match action {
                CadenceAction::BeginEmission => {
                    if let Err(e) = self.begin_emission(now) {
                        self.stop_sources();
                        self.cadence.stop();
                        self.transmit_started = None;
                        return Err(e);
                    }
                }
                CadenceAction::EndEmission => self.end_emission(),
            }
        }
        Ok(())
    }

    fn begin_emission(&mut self, now: Instant) -> Result<(), BeaconError> {
        self.generation += 1;
        match self.mode {
            BeaconMode::Tone => {
                // No-op on an already-sounding carrier, so continuous
                // mode re-begins without a gap
                self.tone.start()?;
                self.transmit_started = Some(now);
            }
            BeaconMode::Morse => {
                self.morse.play(
                    &self.morse_text,
                    self.wpm,
                    self.tone_params.frequency_hz(),
                    self.tone_params.amplitude(),
                    self.completion_tx.clone(),
                    self.generation,
                )?;
                self.transmit_started = Some(now);
            }
            BeaconMode::Message(id) => {
                let recording = self
                    .store
                    .get(id)
                    .cloned()
                    .ok_or_else(|| BeaconError::PlaybackFailed("recording removed".into()))?;
                self.message
                    .play(&recording, self.completion_tx.clone(), self.generation)?;
                self.transmit_started = Some(now);
            }
        }
        Ok(())
    }

    fn end_emission(&mut self) {
        self.stop_sources();
        self.transmit_started = None;
    }

    fn stop_sources(&mut self) {
        self.tone.stop();
        self.morse.stop();
        self.message.stop();
    }
}

impl Default for BeaconController {
    fn default() -> Self {
        Self::new()
    }
}

/// Render CW text straight to a WAV byte buffer, bypassing the audio
/// device. Used for export.
pub fn render_morse_to_wav(
    text: &str,
    wpm: u8,
    frequency_hz: f32,
    amplitude: f32,
    sample_rate: u32,
) -> Result<Vec<u8>, BeaconError> {
    if text.trim().is_empty() {
        return Err(BeaconError::EmptyText);
    }
    let pattern = text_to_morse(text);
    if pattern.is_empty() {
        return Err(BeaconError::NoMorseCharacters);
    }
    let timing = MorseTiming::from_wpm(wpm);
    let frames = render_pattern(&pattern, timing, frequency_hz, amplitude, sample_rate);
    Ok(frames_to_wav(&frames, sample_rate))
}
