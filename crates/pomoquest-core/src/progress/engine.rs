//! Progress & achievement engine.
//!
//! Single writer of the [`Progress`] record. Every completion is applied in
//! memory first and then persisted in full through the [`ProgressStore`];
//! a failed save is logged and the in-memory record stays authoritative.

use tracing::{debug, info, warn};

use super::achievements::{self, AchievementState};
use super::clock::{Clock, SystemClock};
use super::model::Progress;
use crate::storage::ProgressStore;
use crate::timer::{Phase, Profile};

pub struct ProgressEngine<S, C = SystemClock> {
    store: S,
    clock: C,
    progress: Progress,
}

impl<S: ProgressStore> ProgressEngine<S> {
    /// Load from `store` using the local wall-clock date.
    pub fn load(store: S) -> Self {
        Self::load_with_clock(store, SystemClock)
    }
}

impl<S: ProgressStore, C: Clock> ProgressEngine<S, C> {
    /// Load the stored record and reconcile it with today's date.
    ///
    /// When the last work session was on an earlier day, `daily_work` is
    /// zeroed for display. The streak is left alone: a broken streak is only
    /// detected by the next work completion.
    pub fn load_with_clock(store: S, clock: C) -> Self {
        let mut progress = store.load();
        let today = clock.today();
        if matches!(progress.last_date, Some(last) if last != today) && progress.daily_work != 0 {
            debug!(last_date = ?progress.last_date, %today, "new day, clearing daily counter");
            progress.daily_work = 0;
            if let Err(e) = store.save(&progress) {
                warn!(error = %e, "failed to persist daily reset");
            }
        }
        Self {
            store,
            clock,
            progress,
        }
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Record one finished countdown. The only mutator of the record.
    ///
    /// Returns the achievements this completion unlocked.
    pub fn complete_session(&mut self, phase: Phase, profile: Profile) -> Vec<AchievementState> {
        let before = self.progress.clone();
        let today = self.clock.today();
        let p = &mut self.progress;

        match phase {
            Phase::Break => {
                p.total_break = p.total_break.saturating_add(1);
                p.break_by_mode.increment(profile);
            }
            Phase::Work => {
                p.total_work = p.total_work.saturating_add(1);
                p.work_by_mode.increment(profile);

                match p.last_date {
                    Some(last) if last == today => p.daily_work = p.daily_work.saturating_add(1),
                    None => {
                        p.daily_work = 1;
                        p.streak = 1;
                    }
                    Some(last) => {
                        p.daily_work = 1;
                        p.streak = if today.pred_opt() == Some(last) {
                            p.streak.saturating_add(1)
                        } else {
                            1
                        };
                    }
                }
                p.last_date = Some(today);
            }
        }

        info!(
            %phase,
            %profile,
            total_work = p.total_work,
            total_break = p.total_break,
            streak = p.streak,
            "session recorded"
        );

        if let Err(e) = self.store.save(&self.progress) {
            warn!(error = %e, "failed to persist progress");
        }

        let unlocked: Vec<_> = achievements::newly_unlocked(&before, &self.progress)
            .into_iter()
            .map(|a| a.evaluate(&self.progress))
            .collect();
        for a in &unlocked {
            info!(id = a.id, "achievement unlocked");
        }
        unlocked
    }

    /// All rules annotated with their current unlock state.
    pub fn achievement_states(&self) -> Vec<AchievementState> {
        achievements::evaluate_all(&self.progress)
    }
}
