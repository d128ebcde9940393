//! Morse pattern rendering: timing walk and waveform synthesis.
//!
//! A pattern string (from `vb_core::text_to_morse`) compiles into an
//! ordered list of tone/silence segments. The duration pass and the
//! sample pass both consume the same segment list, so the gap rules can
//! never diverge between them: 1 dit between elements, 3 dits between
//! characters, and 3 + 4 = 7 dits across a word boundary.

use alloc::vec::Vec;
use core::f32::consts::TAU;

use vb_core::{MorseTiming, WORD_SPACE};

use crate::envelope::{burst_gain, RAMP_SECS};
use crate::frame::Frame;

/// One timed span of a Morse transmission.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    /// Keyed carrier for the given duration in seconds.
    Tone(f32),
    /// Unkeyed gap for the given duration in seconds.
    Silence(f32),
}

impl Segment {
    /// Duration of the segment in seconds.
    pub fn duration_secs(&self) -> f32 {
        match self {
            Segment::Tone(d) | Segment::Silence(d) => *d,
        }
    }

    /// Number of output samples at the given rate.
    ///
    /// Both the duration pass and the render pass size segments through
    /// this one rounding, which is what keeps their totals identical.
    pub fn samples(&self, sample_rate: u32) -> usize {
        libm::roundf(self.duration_secs() * sample_rate as f32) as usize
    }
}

/// Compile a pattern string into tone/silence segments.
///
/// The pattern is space-separated character codes of `.` and `-`, with
/// [`WORD_SPACE`] tokens marking word boundaries. Unknown symbols inside
/// a token are skipped.
pub fn segments(pattern: &str, timing: MorseTiming) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut after_word_space = true; // suppress the gap before the first character

    for token in pattern.split(' ') {
        if token.is_empty() {
            continue;
        }
        if token.len() == 1 && token.starts_with(WORD_SPACE) {
            // 3-dit character gap plus 4 extra dits: 7 in total
            out.push(Segment::Silence(timing.char_gap_secs()));
            out.push(Segment::Silence(timing.word_gap_extra_secs()));
            after_word_space = true;
            continue;
        }

        if !after_word_space {
            out.push(Segment::Silence(timing.char_gap_secs()));
        }
        after_word_space = false;

        let mut first_element = true;
        for symbol in token.chars() {
            let duration = match symbol {
                '.' => timing.dit_secs(),
                '-' => timing.dah_secs(),
                _ => continue,
            };
            if !first_element {
                out.push(Segment::Silence(timing.element_gap_secs()));
            }
            first_element = false;
            out.push(Segment::Tone(duration));
        }
    }

    out
}

/// Total duration of a pattern in seconds (timing pass).
pub fn pattern_duration_secs(pattern: &str, timing: MorseTiming) -> f32 {
    segments(pattern, timing)
        .iter()
        .map(Segment::duration_secs)
        .sum()
}

/// Total sample count of a pattern at the given rate.
///
/// Always equals the length of the buffer produced by
/// [`render_pattern`] for the same inputs.
pub fn pattern_samples(pattern: &str, timing: MorseTiming, sample_rate: u32) -> usize {
    segments(pattern, timing)
        .iter()
        .map(|s| s.samples(sample_rate))
        .sum()
}

/// Render a pattern into an envelope-shaped audio buffer (sample pass).
///
/// Each dit/dah becomes a sine burst at `frequency_hz` shaped with a 5 ms
/// raised-cosine attack and release; gaps are zeroed frames.
pub fn render_pattern(
    pattern: &str,
    timing: MorseTiming,
    frequency_hz: f32,
    amplitude: f32,
    sample_rate: u32,
) -> Vec<Frame> {
    let segs = segments(pattern, timing);
    let total: usize = segs.iter().map(|s| s.samples(sample_rate)).sum();
    let mut frames = Vec::with_capacity(total);

    let ramp_samples = libm::roundf(RAMP_SECS * sample_rate as f32) as usize;
    let phase_increment = TAU * frequency_hz / sample_rate as f32;

    for seg in &segs {
        let n = seg.samples(sample_rate);
        match seg {
            Segment::Silence(_) => {
                frames.extend(core::iter::repeat(Frame::silence()).take(n));
            }
            Segment::Tone(_) => {
                let mut phase: f32 = 0.0;
                for i in 0..n {
                    let gain = burst_gain(i, n, ramp_samples);
                    let sample = amplitude * gain * libm::sinf(phase);
                    frames.push(Frame::from_f32(sample));
                    phase += phase_increment;
                    if phase >= TAU {
                        phase -= TAU;
                    }
                }
            }
        }
    }

    frames
}
