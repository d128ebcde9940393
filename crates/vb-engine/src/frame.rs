//! Audio frame type.

/// A stereo audio frame (16-bit integer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub left: i16,
    pub right: i16,
}

impl Frame {
    /// Create a silent frame.
    pub const fn silence() -> Self {
        Self { left: 0, right: 0 }
    }

    /// Create a mono frame (same value for both channels).
    pub const fn mono(value: i16) -> Self {
        Self {
            left: value,
            right: value,
        }
    }

    /// Convert a normalized sample in [-1, 1] to a mono frame.
    ///
    /// Values outside the range are clamped rather than wrapped.
    pub fn from_f32(value: f32) -> Self {
        let scaled = (value * 32767.0).clamp(-32768.0, 32767.0) as i16;
        Self::mono(scaled)
    }

    /// True if both channels are zero.
    pub const fn is_silent(&self) -> bool {
        self.left == 0 && self.right == 0
    }
}
