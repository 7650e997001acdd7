//! Wires the timer to progress tracking and notifications.
//!
//! A [`Session`] owns one [`TimerEngine`], one [`ProgressEngine`] and one
//! [`Notifier`]. Every completion event produced by the timer is fed to the
//! progress engine first and then to the notifier.

use serde::Serialize;

use crate::events::Event;
use crate::notify::{LocalNotifier, Notifier};
use crate::progress::{AchievementState, Clock, ProgressEngine, SystemClock};
use crate::storage::ProgressStore;
use crate::timer::{Phase, Profile, TimerEngine};

/// User-level timer commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The combined start/reset control.
    Toggle,
    Start,
    Reset,
    SetProfile(Profile),
    SetPhase(Phase),
}

/// Outcome of a finished countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub phase: Phase,
    pub profile: Profile,
    pub unlocked: Vec<AchievementState>,
}

pub struct Session<S, L, C = SystemClock> {
    timer: TimerEngine,
    progress: ProgressEngine<S, C>,
    notifier: Notifier<L>,
}

impl<S, L, C> Session<S, L, C>
where
    S: ProgressStore,
    L: LocalNotifier,
    C: Clock,
{
    pub fn new(timer: TimerEngine, progress: ProgressEngine<S, C>, notifier: Notifier<L>) -> Self {
        Self {
            timer,
            progress,
            notifier,
        }
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn progress(&self) -> &ProgressEngine<S, C> {
        &self.progress
    }

    pub fn notifier(&self) -> &Notifier<L> {
        &self.notifier
    }

    pub fn execute(&mut self, command: Command) -> Option<Event> {
        match command {
            Command::Toggle => self.timer.reset_or_stop(),
            Command::Start => self.timer.start(),
            Command::Reset => self.timer.reset_to_configured(),
            Command::SetProfile(profile) => self.timer.set_profile(profile),
            Command::SetPhase(phase) => self.timer.set_phase(phase),
        }
    }

    /// Advance the countdown one second and process a completion if the
    /// countdown just reached zero.
    pub fn tick(&mut self) -> Option<Completion> {
        let event = self.timer.tick()?;
        self.handle_event(&event)
    }

    /// Feed a timer event through progress tracking and notifications.
    /// Only `SessionCompleted` has an effect.
    pub fn handle_event(&mut self, event: &Event) -> Option<Completion> {
        let (phase, profile) = event.completion()?;
        let unlocked = self.progress.complete_session(phase, profile);
        // The push task is fire-and-forget.
        let _ = self.notifier.session_completed(phase);
        Some(Completion {
            phase,
            profile,
            unlocked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NotificationContent, NotificationPermission};
    use crate::progress::FixedClock;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;
    use std::cell::Cell;

    #[derive(Default)]
    struct Counter(Cell<usize>);

    impl LocalNotifier for Counter {
        fn show(&self, _content: &NotificationContent) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn session(clock: &FixedClock) -> Session<MemoryStore, Counter, &FixedClock> {
        Session::new(
            TimerEngine::new(Profile::Junior),
            ProgressEngine::load_with_clock(MemoryStore::new(), clock),
            Notifier::new(Counter::default(), NotificationPermission::Granted),
        )
    }

    #[test]
    fn completed_break_updates_progress_and_notifies() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let mut session = session(&clock);
        session.execute(Command::SetPhase(Phase::Break));
        session.execute(Command::Toggle);

        let mut completions = Vec::new();
        for _ in 0..200 {
            completions.extend(session.tick());
        }

        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].phase, Phase::Break);
        assert_eq!(completions[0].profile, Profile::Junior);
        assert_eq!(completions[0].unlocked[0].id, "first_break");
        assert_eq!(session.progress().progress().total_break, 1);
        assert_eq!(session.progress().progress().break_by_mode.junior, 1);
        assert_eq!(session.notifier().local().0.get(), 1);
    }

    #[test]
    fn push_enabled_completion_outside_runtime_still_records() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let relay = crate::notify::PushRelayClient::new("http://127.0.0.1:9/api/send-push").unwrap();
        let mut session = Session::new(
            TimerEngine::new(Profile::Junior),
            ProgressEngine::load_with_clock(MemoryStore::new(), &clock),
            Notifier::new(Counter::default(), NotificationPermission::Granted)
                .with_push(relay, Some(serde_json::json!({ "endpoint": "x" }))),
        );
        session.execute(Command::SetPhase(Phase::Break));
        session.execute(Command::Start);

        let completions: Vec<_> = (0..180).filter_map(|_| session.tick()).collect();

        assert_eq!(completions.len(), 1);
        assert_eq!(session.progress().progress().total_break, 1);
        assert_eq!(session.notifier().local().0.get(), 1);
    }

    #[test]
    fn non_completion_events_are_ignored() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let mut session = session(&clock);
        let started = session.execute(Command::Start).unwrap();
        assert!(session.handle_event(&started).is_none());
        assert_eq!(session.progress().progress().total_work, 0);
    }

    #[test]
    fn reset_mid_session_records_nothing() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let mut session = session(&clock);
        session.execute(Command::Start);
        for _ in 0..899 {
            assert!(session.tick().is_none());
        }
        session.execute(Command::Reset);
        assert_eq!(session.timer().remaining_secs(), 900);
        for _ in 0..10 {
            assert!(session.tick().is_none());
        }
        assert_eq!(session.progress().progress().total_work, 0);
    }
}
