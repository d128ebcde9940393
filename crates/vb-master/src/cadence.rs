//! Cadence state machine: when to transmit, when to wait.
//!
//! The engine owns no audio. It tracks the beacon phase and, for each
//! operation, returns the emission actions the caller must execute
//! against the active content source. Keeping the machine pure makes
//! every transition deterministic and directly testable with synthetic
//! clock values.

use arrayvec::ArrayVec;
use std::time::{Duration, Instant};
use vb_core::{CadenceConfig, CadencePhase};

/// Nominal countdown granularity for callers pumping [`CadenceEngine::tick`].
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Emission command for the coordinating layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CadenceAction {
    /// Start the active content source.
    BeginEmission,
    /// Stop the active content source.
    EndEmission,
}

/// Bounded action list — no transition emits more than two actions.
pub type CadenceActions = ArrayVec<CadenceAction, 2>;

/// Phase state machine for the transmit/wait cycle.
pub struct CadenceEngine {
    config: CadenceConfig,
    phase: CadencePhase,
    /// Wall-clock moment the current wait began.
    wait_started: Option<Instant>,
}

impl CadenceEngine {
    pub fn new(config: CadenceConfig) -> Self {
        Self {
            config,
            phase: CadencePhase::Idle,
            wait_started: None,
        }
    }

    pub fn phase(&self) -> CadencePhase {
        self.phase
    }

    pub fn config(&self) -> &CadenceConfig {
        &self.config
    }

    /// Configuration is re-read at each phase boundary, so callers may
    /// adjust it freely between cycles.
    pub fn config_mut(&mut self) -> &mut CadenceConfig {
        &mut self.config
    }

    /// Begin the beacon cycle.
    ///
    /// Idempotent: a no-op (not an error) unless the engine is Idle.
    pub fn start(&mut self) -> CadenceActions {
        let mut actions = CadenceActions::new();
        if self.phase != CadencePhase::Idle {
            return actions;
        }
        self.phase = CadencePhase::Transmitting;
        actions.push(CadenceAction::BeginEmission);
        actions
    }

    /// Stop the beacon cycle from any phase.
    ///
    /// Emits `EndEmission` only if currently transmitting; always resets
    /// to Idle, cancels any pending wait, and clears time-remaining.
    /// Idempotent when already Idle.
    pub fn stop(&mut self) -> CadenceActions {
        let mut actions = CadenceActions::new();
        if self.phase == CadencePhase::Transmitting {
            actions.push(CadenceAction::EndEmission);
        }
        self.phase = CadencePhase::Idle;
        self.wait_started = None;
        actions
    }

    /// Handle natural completion of the active content source.
    ///
    /// Valid only while Transmitting; calls in any other phase are
    /// ignored, which makes a completion callback that races a
    /// user-initiated stop harmless. In continuous mode the next emission
    /// begins immediately with no waiting phase.
    pub fn content_did_finish(&mut self, now: Instant) -> CadenceActions {
        let mut actions = CadenceActions::new();
        if self.phase != CadencePhase::Transmitting {
            return actions;
        }
        if self.config.continuous {
            actions.push(CadenceAction::BeginEmission);
            return actions;
        }
        self.phase = CadencePhase::Waiting;
        self.wait_started = Some(now);
        actions.push(CadenceAction::EndEmission);
        actions
    }

    /// Advance the wait countdown.
    ///
    /// Elapsed time is recomputed from the wall clock on every call
    /// rather than decremented, so missed or late ticks never accumulate
    /// drift. Safe to call in any phase at any rate.
    pub fn tick(&mut self, now: Instant) -> CadenceActions {
        let mut actions = CadenceActions::new();
        if self.phase != CadencePhase::Waiting {
            return actions;
        }
        let Some(started) = self.wait_started else {
            return actions;
        };
        if now.duration_since(started).as_secs_f32() >= self.config.pause_secs() {
            self.phase = CadencePhase::Transmitting;
            self.wait_started = None;
            actions.push(CadenceAction::BeginEmission);
        }
        actions
    }

    /// Seconds left in the current wait, or `None` outside Waiting.
    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        let started = self.wait_started?;
        let pause = Duration::from_secs_f32(self.config.pause_secs());
        let elapsed = now.duration_since(started);
        Some(pause.saturating_sub(elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(pause_secs: f32, continuous: bool) -> CadenceEngine {
        CadenceEngine::new(CadenceConfig::new(pause_secs, continuous))
    }

    fn begin_count(actions: &CadenceActions) -> usize {
        actions
            .iter()
            .filter(|a| **a == CadenceAction::BeginEmission)
            .count()
    }

    #[test]
    fn start_transitions_to_transmitting() {
        let mut eng = engine(10.0, false);
        let actions = eng.start();
        assert_eq!(eng.phase(), CadencePhase::Transmitting);
        assert_eq!(actions.as_slice(), [CadenceAction::BeginEmission]);
    }

    #[test]
    fn start_is_idempotent() {
        let mut eng = engine(10.0, false);
        let first = eng.start();
        let second = eng.start();
        assert_eq!(begin_count(&first) + begin_count(&second), 1);
        assert_eq!(eng.phase(), CadencePhase::Transmitting);
    }

    #[test]
    fn stop_from_transmitting_ends_emission() {
        let mut eng = engine(10.0, false);
        eng.start();
        let actions = eng.stop();
        assert_eq!(actions.as_slice(), [CadenceAction::EndEmission]);
        assert_eq!(eng.phase(), CadencePhase::Idle);
    }

    #[test]
    fn stop_when_idle_is_noop() {
        let mut eng = engine(10.0, false);
        assert!(eng.stop().is_empty());
        assert_eq!(eng.phase(), CadencePhase::Idle);
    }

    #[test]
    fn completion_enters_waiting_with_end_emission() {
        let mut eng = engine(10.0, false);
        eng.start();
        let now = Instant::now();
        let actions = eng.content_did_finish(now);
        assert_eq!(actions.as_slice(), [CadenceAction::EndEmission]);
        assert_eq!(eng.phase(), CadencePhase::Waiting);
    }

    #[test]
    fn continuous_completion_rebegins_immediately() {
        let mut eng = engine(10.0, true);
        eng.start();
        let now = Instant::now();
        for _ in 0..5 {
            let actions = eng.content_did_finish(now);
            assert_eq!(actions.as_slice(), [CadenceAction::BeginEmission]);
            assert_eq!(eng.phase(), CadencePhase::Transmitting);
        }
    }

    #[test]
    fn stale_completion_ignored_when_idle() {
        let mut eng = engine(10.0, false);
        assert!(eng.content_did_finish(Instant::now()).is_empty());
        assert_eq!(eng.phase(), CadencePhase::Idle);
    }

    #[test]
    fn stale_completion_ignored_when_waiting() {
        let mut eng = engine(10.0, false);
        eng.start();
        let now = Instant::now();
        eng.content_did_finish(now);
        assert_eq!(eng.phase(), CadencePhase::Waiting);

        // A second (late) completion must not disturb the wait
        assert!(eng.content_did_finish(now).is_empty());
        assert_eq!(eng.phase(), CadencePhase::Waiting);
    }

    #[test]
    fn wait_expires_after_pause() {
        let mut eng = engine(10.0, false);
        eng.start();
        let t0 = Instant::now();
        eng.content_did_finish(t0);

        assert!(eng.tick(t0 + Duration::from_secs_f32(9.9)).is_empty());
        assert_eq!(eng.phase(), CadencePhase::Waiting);

        let actions = eng.tick(t0 + Duration::from_secs_f32(10.0));
        assert_eq!(actions.as_slice(), [CadenceAction::BeginEmission]);
        assert_eq!(eng.phase(), CadencePhase::Transmitting);
    }

    #[test]
    fn late_tick_still_fires_once() {
        // Scheduling jitter: one very late tick must fire exactly one begin
        let mut eng = engine(5.0, false);
        eng.start();
        let t0 = Instant::now();
        eng.content_did_finish(t0);

        let actions = eng.tick(t0 + Duration::from_secs(60));
        assert_eq!(begin_count(&actions), 1);
        assert!(eng.tick(t0 + Duration::from_secs(61)).is_empty());
    }

    #[test]
    fn stop_from_waiting_cancels_pending_begin() {
        let mut eng = engine(2.0, false);
        eng.start();
        let t0 = Instant::now();
        eng.content_did_finish(t0);
        assert_eq!(eng.phase(), CadencePhase::Waiting);

        let actions = eng.stop();
        assert!(actions.is_empty(), "emission already ended before the wait");
        assert_eq!(eng.phase(), CadencePhase::Idle);

        // The expired wait must not fire after stop
        assert!(eng.tick(t0 + Duration::from_secs(10)).is_empty());
        assert_eq!(eng.phase(), CadencePhase::Idle);
    }

    #[test]
    fn time_remaining_recomputed_from_wall_clock() {
        let mut eng = engine(10.0, false);
        eng.start();
        let t0 = Instant::now();
        eng.content_did_finish(t0);

        let remaining = eng.time_remaining(t0 + Duration::from_secs(4)).unwrap();
        assert!((remaining.as_secs_f32() - 6.0).abs() < 0.01);

        // Past the deadline it floors at zero
        let remaining = eng.time_remaining(t0 + Duration::from_secs(30)).unwrap();
        assert_eq!(remaining, Duration::ZERO);
    }

    #[test]
    fn time_remaining_none_outside_waiting() {
        let mut eng = engine(10.0, false);
        assert!(eng.time_remaining(Instant::now()).is_none());
        eng.start();
        assert!(eng.time_remaining(Instant::now()).is_none());
    }

    #[test]
    fn config_change_applies_at_next_boundary() {
        let mut eng = engine(10.0, false);
        eng.start();
        let t0 = Instant::now();
        eng.content_did_finish(t0);

        // Shorten the pause mid-wait; the countdown re-reads it
        eng.config_mut().set_pause_secs(2.0);
        let actions = eng.tick(t0 + Duration::from_secs(3));
        assert_eq!(begin_count(&actions), 1);
    }
}
