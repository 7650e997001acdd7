use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::timer::Profile;

/// Per-profile session counters. Keys are fixed to the three profiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeCounts {
    pub junior: u64,
    pub middle: u64,
    pub senior: u64,
}

impl ModeCounts {
    pub fn get(&self, profile: Profile) -> u64 {
        match profile {
            Profile::Junior => self.junior,
            Profile::Middle => self.middle,
            Profile::Senior => self.senior,
        }
    }

    pub fn increment(&mut self, profile: Profile) {
        let slot = match profile {
            Profile::Junior => &mut self.junior,
            Profile::Middle => &mut self.middle,
            Profile::Senior => &mut self.senior,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn sum(&self) -> u64 {
        self.junior
            .saturating_add(self.middle)
            .saturating_add(self.senior)
    }
}

/// Cumulative session progress, persisted as one JSON record.
///
/// Field names on the wire are camelCase; `lastDate` is `YYYY-MM-DD` or the
/// empty string before the first work session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Progress {
    pub total_work: u64,
    pub total_break: u64,
    pub work_by_mode: ModeCounts,
    pub break_by_mode: ModeCounts,
    /// Work sessions completed on `last_date`.
    pub daily_work: u64,
    #[serde(with = "date_or_empty")]
    pub last_date: Option<NaiveDate>,
    /// Consecutive calendar days with at least one work session.
    pub streak: u64,
}

mod date_or_empty {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = String::deserialize(d)?;
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, FORMAT)
            .map(Some)
            .map_err(de::Error::custom)
    }
}
