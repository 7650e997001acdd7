use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Whether the countdown represents work time or break time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn from_is_break(is_break: bool) -> Self {
        if is_break {
            Phase::Break
        } else {
            Phase::Work
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(Phase::Work),
            "break" => Ok(Phase::Break),
            other => Err(ValidationError::UnknownPhase(other.to_string())),
        }
    }
}

/// Named timer configuration fixing work and break durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Junior,
    #[default]
    Middle,
    Senior,
}

/// (work, break) durations in seconds, indexed like [`Profile::ALL`].
const DURATIONS_SECS: [(u64, u64); 3] = [(15 * 60, 3 * 60), (25 * 60, 5 * 60), (45 * 60, 10 * 60)];

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Junior, Profile::Middle, Profile::Senior];

    fn index(self) -> usize {
        match self {
            Profile::Junior => 0,
            Profile::Middle => 1,
            Profile::Senior => 2,
        }
    }

    pub fn work_secs(self) -> u64 {
        DURATIONS_SECS[self.index()].0
    }

    pub fn break_secs(self) -> u64 {
        DURATIONS_SECS[self.index()].1
    }

    /// Configured countdown length for `phase` under this profile.
    pub fn duration_secs(self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_secs(),
            Phase::Break => self.break_secs(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Junior => "junior",
            Profile::Middle => "middle",
            Profile::Senior => "senior",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "junior" => Ok(Profile::Junior),
            "middle" => Ok(Profile::Middle),
            "senior" => Ok(Profile::Senior),
            other => Err(ValidationError::UnknownProfile(other.to_string())),
        }
    }
}

/// Format seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
