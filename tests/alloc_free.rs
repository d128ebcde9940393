//! Allocation-free synthesis path tests.
//!
//! The tone callback runs oscillator arithmetic on the realtime thread,
//! so sample generation must never touch the heap. These tests render
//! several seconds of carrier into preallocated buffers, aborting on any
//! allocation.
//!
//! Just run `cargo test` — no feature flags needed.

use assert_no_alloc::{assert_no_alloc, AllocDisabler};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

use vb_core::ToneParams;
use vb_engine::{Frame, Oscillator};

const SAMPLE_RATE: u32 = 44100;

/// Generate `seconds` of tone into a preallocated block, aborting on any
/// heap allocation.
fn assert_tone_alloc_free(params: ToneParams, seconds: u32) {
    let mut osc = Oscillator::new(params, SAMPLE_RATE);
    let mut block = vec![Frame::silence(); 512];

    let blocks = (SAMPLE_RATE * seconds) as usize / block.len();
    assert_no_alloc(|| {
        for _ in 0..blocks {
            osc.render(&mut block);
        }
    });
}

#[test]
fn default_tone_alloc_free() {
    assert_tone_alloc_free(ToneParams::default(), 5);
}

#[test]
fn band_edge_tones_alloc_free() {
    assert_tone_alloc_free(ToneParams::new(200.0, 1.0), 5);
    assert_tone_alloc_free(ToneParams::new(2000.0, 1.0), 5);
}

#[test]
fn parameter_updates_alloc_free() {
    let mut osc = Oscillator::new(ToneParams::default(), SAMPLE_RATE);
    let mut block = vec![Frame::silence(); 512];

    assert_no_alloc(|| {
        for i in 0..1000 {
            osc.set_frequency_hz(200.0 + i as f32);
            osc.set_amplitude((i % 100) as f32 / 100.0);
            osc.render(&mut block);
        }
    });
}
