//! Tone oscillator parameters.

use core::f32::consts::TAU;

/// Lowest tone frequency the beacon will emit, in Hz.
pub const FREQUENCY_MIN_HZ: f32 = 200.0;

/// Highest tone frequency the beacon will emit, in Hz.
pub const FREQUENCY_MAX_HZ: f32 = 2000.0;

/// Frequency, amplitude, and running phase of the carrier tone.
///
/// `phase_radians` is the only cross-callback mutable state in the tone
/// path: the generation callback reads frequency/amplitude and advances
/// the phase under one lock so live parameter changes stay phase
/// continuous. Out-of-range assignments are clamped, not rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneParams {
    frequency_hz: f32,
    amplitude: f32,
    /// Running oscillator phase, wraps modulo 2π.
    pub phase_radians: f32,
}

impl ToneParams {
    /// Create parameters with frequency and amplitude clamped, phase zero.
    pub fn new(frequency_hz: f32, amplitude: f32) -> Self {
        Self {
            frequency_hz: frequency_hz.clamp(FREQUENCY_MIN_HZ, FREQUENCY_MAX_HZ),
            amplitude: amplitude.clamp(0.0, 1.0),
            phase_radians: 0.0,
        }
    }

    /// Carrier frequency in Hz.
    pub fn frequency_hz(&self) -> f32 {
        self.frequency_hz
    }

    /// Set the frequency, clamped to [200, 2000] Hz.
    pub fn set_frequency_hz(&mut self, hz: f32) {
        self.frequency_hz = hz.clamp(FREQUENCY_MIN_HZ, FREQUENCY_MAX_HZ);
    }

    /// Output amplitude in [0, 1].
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Set the amplitude, clamped to [0, 1].
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.amplitude = amplitude.clamp(0.0, 1.0);
    }

    /// Phase increment per sample at the given output rate.
    pub fn phase_increment(&self, sample_rate: u32) -> f32 {
        TAU * self.frequency_hz / sample_rate as f32
    }

    /// Advance the phase by one sample, wrapping at 2π to bound
    /// floating-point growth.
    pub fn advance_phase(&mut self, sample_rate: u32) {
        self.phase_radians += self.phase_increment(sample_rate);
        if self.phase_radians >= TAU {
            self.phase_radians -= TAU;
        }
    }

    /// Reset the phase to zero for a deterministic restart.
    pub fn reset_phase(&mut self) {
        self.phase_radians = 0.0;
    }
}

impl Default for ToneParams {
    fn default() -> Self {
        Self::new(700.0, 0.8)
    }
}
