use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Phase, Profile};

/// Every timer state change produces an Event.
/// Front-ends render them; `SessionCompleted` drives progress and notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        profile: Profile,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        profile: Profile,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    ProfileChanged {
        profile: Profile,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseChanged {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero. Raised exactly once per completion.
    SessionCompleted {
        phase: Phase,
        profile: Profile,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        running: bool,
        phase: Phase,
        profile: Profile,
        remaining_secs: u64,
        total_secs: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// `(phase, profile)` when this is a completion event.
    pub fn completion(&self) -> Option<(Phase, Profile)> {
        match self {
            Event::SessionCompleted { phase, profile, .. } => Some((*phase, *profile)),
            _ => None,
        }
    }
}
