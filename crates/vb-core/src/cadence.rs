//! Cadence configuration and phase types.

/// Shortest allowed pause between transmissions, in seconds.
pub const PAUSE_MIN_SECS: f32 = 1.0;

/// Longest allowed pause between transmissions, in seconds.
pub const PAUSE_MAX_SECS: f32 = 300.0;

/// Transmit/pause repetition settings for the beacon.
///
/// An immutable snapshot consumed at phase-transition time: the cadence
/// machine re-reads it at each phase boundary, so callers may replace it
/// between cycles without corrupting an in-flight wait.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CadenceConfig {
    pause_secs: f32,
    /// Re-begin emission immediately on completion, with no waiting phase.
    pub continuous: bool,
}

impl CadenceConfig {
    /// Create a configuration with the pause clamped to the valid range.
    pub fn new(pause_secs: f32, continuous: bool) -> Self {
        Self {
            pause_secs: pause_secs.clamp(PAUSE_MIN_SECS, PAUSE_MAX_SECS),
            continuous,
        }
    }

    /// Pause between transmissions, in seconds.
    pub fn pause_secs(&self) -> f32 {
        self.pause_secs
    }

    /// Set the pause, clamped to [1, 300] seconds.
    pub fn set_pause_secs(&mut self, secs: f32) {
        self.pause_secs = secs.clamp(PAUSE_MIN_SECS, PAUSE_MAX_SECS);
    }
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self::new(10.0, false)
    }
}

/// Current phase of the beacon cycle.
///
/// Exactly one phase is active at any instant; `Idle` is both the initial
/// and the terminal state, reachable by an explicit stop from any phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CadencePhase {
    #[default]
    Idle,
    Transmitting,
    Waiting,
}
