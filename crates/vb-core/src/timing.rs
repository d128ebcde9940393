//! Morse timing model derived from words-per-minute.

/// Slowest supported sending speed.
pub const WPM_MIN: u8 = 5;

/// Fastest supported sending speed.
pub const WPM_MAX: u8 = 40;

/// Element durations for a given sending speed.
///
/// Derived, not stored: recomputed per synthesis call from the PARIS
/// standard (50 dit-units per word), `dit = 60 / (50 × WPM)` seconds.
/// All other durations are fixed multiples of the dit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorseTiming {
    dit_secs: f32,
}

impl MorseTiming {
    /// Derive the timing model, clamping WPM to [5, 40].
    pub fn from_wpm(wpm: u8) -> Self {
        let wpm = wpm.clamp(WPM_MIN, WPM_MAX);
        Self {
            dit_secs: 60.0 / (50.0 * wpm as f32),
        }
    }

    /// Duration of a dot, in seconds.
    pub fn dit_secs(&self) -> f32 {
        self.dit_secs
    }

    /// Duration of a dash: 3 dits.
    pub fn dah_secs(&self) -> f32 {
        3.0 * self.dit_secs
    }

    /// Gap between elements of the same character: 1 dit.
    pub fn element_gap_secs(&self) -> f32 {
        self.dit_secs
    }

    /// Gap between characters: 3 dits.
    pub fn char_gap_secs(&self) -> f32 {
        3.0 * self.dit_secs
    }

    /// Extra gap on a word boundary, emitted together with the character
    /// gap: 4 dits, for a 7-dit total.
    pub fn word_gap_extra_secs(&self) -> f32 {
        4.0 * self.dit_secs
    }
}
