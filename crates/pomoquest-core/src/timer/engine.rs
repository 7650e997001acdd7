//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use
//! internal threads - the caller (usually [`super::Ticker`]) is responsible
//! for calling `tick()` once per elapsed second while running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Idle   (reset, phase switch, or countdown reaching zero)
//! ```
//!
//! Phase (work/break) and profile are orthogonal to the running flag.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(Profile::Middle);
//! engine.start();
//! // Once per second:
//! if let Some(event) = engine.tick() { /* session completed */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::profile::{Phase, Profile};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

/// Core timer engine. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    profile: Profile,
    phase: Phase,
    remaining_secs: u64,
    running: bool,
    /// Bumped every time `remaining_secs` is re-armed to a full duration.
    duration_epoch: u64,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}

impl TimerEngine {
    /// Create an idle engine in the work phase of `profile`.
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            phase: Phase::Work,
            remaining_secs: profile.duration_secs(Phase::Work),
            running: false,
            duration_epoch: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running
        } else {
            TimerState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn duration_epoch(&self) -> u64 {
        self.duration_epoch
    }

    /// Full configured duration of the current (phase, profile).
    pub fn total_secs(&self) -> u64 {
        self.profile.duration_secs(self.phase)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            running: self.running,
            phase: self.phase,
            profile: self.profile,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            at: Utc::now(),
        }
    }

    fn rearm_duration(&mut self) {
        self.remaining_secs = self.total_secs();
        self.duration_epoch = self.duration_epoch.wrapping_add(1);
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Idle -> Running. No-op when already running or when nothing is left
    /// to count down (a phase/profile change re-arms the duration).
    pub fn start(&mut self) -> Option<Event> {
        if self.running || self.remaining_secs == 0 {
            return None;
        }
        self.running = true;
        debug!(phase = %self.phase, profile = %self.profile, remaining = self.remaining_secs, "timer started");
        Some(Event::TimerStarted {
            phase: self.phase,
            profile: self.profile,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and restore the full duration of the current (phase, profile).
    pub fn reset_to_configured(&mut self) -> Option<Event> {
        self.running = false;
        self.rearm_duration();
        debug!(phase = %self.phase, profile = %self.profile, "timer reset");
        Some(Event::TimerReset {
            phase: self.phase,
            profile: self.profile,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// The single start/reset control: resets while running, starts while idle.
    pub fn reset_or_stop(&mut self) -> Option<Event> {
        if self.running {
            self.reset_to_configured()
        } else {
            self.start()
        }
    }

    /// Switch profile in any state. The running flag is left untouched.
    pub fn set_profile(&mut self, profile: Profile) -> Option<Event> {
        self.profile = profile;
        self.rearm_duration();
        debug!(%profile, running = self.running, "profile changed");
        Some(Event::ProfileChanged {
            profile,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Switch phase in any state. Always stops the countdown.
    pub fn set_phase(&mut self, phase: Phase) -> Option<Event> {
        self.phase = phase;
        self.running = false;
        self.rearm_duration();
        debug!(%phase, "phase changed");
        Some(Event::PhaseChanged {
            phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Advance one second. Returns `Some(Event::SessionCompleted)` on the
    /// tick that reaches zero, and only on that tick.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.running = false;
        debug!(phase = %self.phase, profile = %self.profile, "countdown reached zero");
        Some(Event::SessionCompleted {
            phase: self.phase,
            profile: self.profile,
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_engine_is_idle_in_work_phase() {
        let engine = TimerEngine::default();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.phase(), Phase::Work);
        assert_eq!(engine.profile(), Profile::Middle);
        assert_eq!(engine.remaining_secs(), 1500);
    }

    #[test]
    fn start_is_noop_when_running() {
        let mut engine = TimerEngine::default();
        assert!(engine.start().is_some());
        assert!(engine.start().is_none());
        assert!(engine.is_running());
    }

    #[test]
    fn full_middle_work_session_completes_once() {
        let mut engine = TimerEngine::new(Profile::Middle);
        engine.start();

        let mut completions = Vec::new();
        for _ in 0..1500 {
            if let Some(event) = engine.tick() {
                completions.push(event);
            }
        }

        assert_eq!(engine.remaining_secs(), 0);
        assert!(!engine.is_running());
        assert_eq!(completions.len(), 1);
        assert_eq!(
            completions[0].completion(),
            Some((Phase::Work, Profile::Middle))
        );

        // Further ticks stay silent while pinned at zero.
        for _ in 0..10 {
            assert!(engine.tick().is_none());
        }
        assert_eq!(engine.remaining_secs(), 0);
    }

    #[test]
    fn start_at_zero_is_noop_until_duration_rearmed() {
        let mut engine = TimerEngine::new(Profile::Junior);
        engine.set_phase(Phase::Break);
        engine.start();
        for _ in 0..180 {
            engine.tick();
        }
        assert_eq!(engine.remaining_secs(), 0);

        assert!(engine.start().is_none());
        assert!(engine.reset_or_stop().is_none());
        assert!(!engine.is_running());

        engine.set_phase(Phase::Work);
        assert_eq!(engine.remaining_secs(), 900);
        assert!(engine.start().is_some());
    }

    #[test]
    fn set_phase_resets_and_stops() {
        let mut engine = TimerEngine::new(Profile::Junior);
        assert_eq!(engine.remaining_secs(), 900);
        engine.start();
        engine.set_phase(Phase::Break);
        assert_eq!(engine.remaining_secs(), 180);
        assert!(!engine.is_running());
    }

    #[test]
    fn set_profile_keeps_running_flag() {
        let mut engine = TimerEngine::default();
        engine.start();
        engine.tick();
        engine.set_profile(Profile::Senior);
        assert!(engine.is_running());
        assert_eq!(engine.remaining_secs(), 2700);

        engine.reset_to_configured();
        engine.set_profile(Profile::Junior);
        assert!(!engine.is_running());
        assert_eq!(engine.remaining_secs(), 900);
    }

    #[test]
    fn reset_or_stop_toggles() {
        let mut engine = TimerEngine::default();
        assert!(matches!(
            engine.reset_or_stop(),
            Some(Event::TimerStarted { .. })
        ));
        for _ in 0..42 {
            engine.tick();
        }
        assert_eq!(engine.remaining_secs(), 1458);
        assert!(matches!(
            engine.reset_or_stop(),
            Some(Event::TimerReset { .. })
        ));
        assert!(!engine.is_running());
        assert_eq!(engine.remaining_secs(), 1500);
    }

    #[test]
    fn duration_epoch_moves_on_every_rearm() {
        let mut engine = TimerEngine::default();
        assert_eq!(engine.duration_epoch(), 0);
        engine.start();
        engine.tick();
        assert_eq!(engine.duration_epoch(), 0);
        engine.set_profile(Profile::Senior);
        engine.set_phase(Phase::Break);
        engine.reset_to_configured();
        assert_eq!(engine.duration_epoch(), 3);
    }

    #[test]
    fn idle_ticks_do_not_decrement() {
        let mut engine = TimerEngine::default();
        engine.tick();
        assert_eq!(engine.remaining_secs(), 1500);
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let engine = TimerEngine::new(Profile::Senior);
        match engine.snapshot() {
            Event::StateSnapshot {
                running,
                remaining_secs,
                total_secs,
                ..
            } => {
                assert!(!running);
                assert_eq!(remaining_secs, 2700);
                assert_eq!(total_secs, 2700);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
