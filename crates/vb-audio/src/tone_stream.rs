//! Continuous carrier tone generated inside the audio callback.
//!
//! Unlike the CW/message paths, the tone has no precomputed buffer: the
//! stream callback synthesizes each block from oscillator state shared
//! with the control thread. Both sides take the same mutex; the callback
//! holds it for one output block of pure arithmetic, so worst-case
//! contention for a parameter update is a single block.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use std::sync::{Arc, Mutex};
use vb_core::ToneParams;
use vb_engine::Oscillator;

use crate::traits::AudioError;

/// Real-time sine tone output with live frequency/amplitude control.
pub struct ToneStream {
    shared: Arc<Mutex<Oscillator>>,
    stream: Option<Stream>,
}

impl ToneStream {
    /// Create an inactive tone stream with the given initial parameters.
    pub fn new(params: ToneParams) -> Self {
        Self {
            // Rate is rebound when the device is opened in `start`
            shared: Arc::new(Mutex::new(Oscillator::new(params, 44100))),
            stream: None,
        }
    }

    /// True while the carrier is sounding.
    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Begin generation from zero phase.
    ///
    /// A no-op (not an error) if the tone is already active — callers may
    /// re-issue start freely, and continuous-carrier mode relies on the
    /// restart being absorbed without interrupting the stream.
    pub fn start(&mut self) -> Result<(), AudioError> {
        if self.stream.is_some() {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceInit(e.to_string()))?;
        let mut config: StreamConfig = config.into();
        config.channels = 2;

        let sample_rate = config.sample_rate.0;
        if let Ok(mut osc) = self.shared.lock() {
            osc.set_sample_rate(sample_rate);
        }

        let shared = self.shared.clone();
        let channels = config.channels as usize;

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    // Never block the callback on a poisoned lock
                    let Ok(mut osc) = shared.lock() else {
                        data.fill(0.0);
                        return;
                    };
                    for chunk in data.chunks_mut(channels) {
                        let sample = osc.next_sample();
                        for (i, out) in chunk.iter_mut().enumerate() {
                            *out = if i < 2 { sample } else { 0.0 };
                        }
                    }
                },
                |err| eprintln!("Tone stream error: {}", err),
                None,
            )
            .map_err(|e| AudioError::StreamCreate(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::Playback(e.to_string()))?;
        self.stream = Some(stream);
        Ok(())
    }

    /// Halt generation and reset the phase for a deterministic restart.
    ///
    /// Idempotent; safe to call while already stopped.
    pub fn stop(&mut self) {
        self.stream = None;
        if let Ok(mut osc) = self.shared.lock() {
            osc.reset();
        }
    }

    /// Set the carrier frequency. Clamped to [200, 2000] Hz; takes effect
    /// on the next generated sample without a phase restart.
    pub fn set_frequency_hz(&mut self, hz: f32) {
        if let Ok(mut osc) = self.shared.lock() {
            osc.set_frequency_hz(hz);
        }
    }

    /// Set the output amplitude, clamped to [0, 1].
    pub fn set_amplitude(&mut self, amplitude: f32) {
        if let Ok(mut osc) = self.shared.lock() {
            osc.set_amplitude(amplitude);
        }
    }

    /// Snapshot of the current oscillator parameters.
    pub fn params(&self) -> ToneParams {
        self.shared
            .lock()
            .map(|osc| *osc.params())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_on_creation() {
        let tone = ToneStream::new(ToneParams::default());
        assert!(!tone.is_active());
    }

    #[test]
    fn parameter_updates_apply_while_inactive() {
        let mut tone = ToneStream::new(ToneParams::new(700.0, 0.8));
        tone.set_frequency_hz(3000.0);
        tone.set_amplitude(0.5);
        assert_eq!(tone.params().frequency_hz(), 2000.0);
        assert_eq!(tone.params().amplitude(), 0.5);
    }

    #[test]
    fn stop_without_start_is_harmless() {
        let mut tone = ToneStream::new(ToneParams::default());
        tone.stop();
        tone.stop();
        assert!(!tone.is_active());
    }
}
