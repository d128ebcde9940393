//! Continuous sine oscillator for the carrier tone.

use vb_core::ToneParams;

use crate::frame::Frame;

/// Sample-by-sample sine generator with live parameter updates.
///
/// Frequency and amplitude may change while running; the change takes
/// effect on the next generated sample without restarting the phase, so
/// modulation stays continuous and click-free. The render path is pure
/// arithmetic — no allocation, suitable for a realtime callback.
#[derive(Clone, Debug)]
pub struct Oscillator {
    params: ToneParams,
    sample_rate: u32,
}

impl Oscillator {
    /// Create an oscillator at the given output rate, phase zero.
    pub fn new(params: ToneParams, sample_rate: u32) -> Self {
        Self {
            params,
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Rebind the oscillator to a new output rate and restart from zero
    /// phase. Called when the output device is (re)opened.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
        self.params.reset_phase();
    }

    /// Current parameters (frequency, amplitude, phase).
    pub fn params(&self) -> &ToneParams {
        &self.params
    }

    /// Set the carrier frequency, clamped to the beacon range.
    pub fn set_frequency_hz(&mut self, hz: f32) {
        self.params.set_frequency_hz(hz);
    }

    /// Set the output amplitude, clamped to [0, 1].
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.params.set_amplitude(amplitude);
    }

    /// Generate the next sample and advance the phase.
    pub fn next_sample(&mut self) -> f32 {
        let sample = self.params.amplitude() * libm::sinf(self.params.phase_radians);
        self.params.advance_phase(self.sample_rate);
        sample
    }

    /// Fill a block of output frames.
    pub fn render(&mut self, out: &mut [Frame]) {
        #[cfg(feature = "alloc_check")]
        assert_no_alloc::assert_no_alloc(|| self.render_block(out));
        #[cfg(not(feature = "alloc_check"))]
        self.render_block(out);
    }

    fn render_block(&mut self, out: &mut [Frame]) {
        for frame in out.iter_mut() {
            *frame = Frame::from_f32(self.next_sample());
        }
    }

    /// Reset the phase to zero for a deterministic restart.
    pub fn reset(&mut self) {
        self.params.reset_phase();
    }
}
