//! Fixed achievement rule table.
//!
//! Unlock state is never stored: it is re-derived from [`Progress`] on every
//! read, which costs one predicate call per rule.

use serde::Serialize;

use super::model::Progress;

/// Static achievement definition.
#[derive(Debug, Clone, Copy)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub condition: fn(&Progress) -> bool,
    /// Progress hint such as `"3/10"`, shown only while locked.
    pub progress_label: Option<fn(&Progress) -> String>,
}

/// An achievement evaluated against a particular [`Progress`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementState {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_label: Option<String>,
}

impl Achievement {
    pub fn evaluate(&self, progress: &Progress) -> AchievementState {
        let unlocked = (self.condition)(progress);
        let progress_label = if unlocked {
            None
        } else {
            self.progress_label.map(|label| label(progress))
        };
        AchievementState {
            id: self.id,
            name: self.name,
            description: self.description,
            unlocked,
            progress_label,
        }
    }
}

pub static ACHIEVEMENTS: [Achievement; 9] = [
    Achievement {
        id: "first_pomodoro",
        name: "Первый помодоро",
        description: "Завершите первую рабочую сессию",
        condition: |p| p.total_work >= 1,
        progress_label: None,
    },
    Achievement {
        id: "ten_pomodoro",
        name: "Десятка",
        description: "Завершите 10 рабочих сессий",
        condition: |p| p.total_work >= 10,
        progress_label: Some(|p| format!("{}/10", p.total_work)),
    },
    Achievement {
        id: "hundred_pomodoro",
        name: "Сотня",
        description: "Завершите 100 рабочих сессий",
        condition: |p| p.total_work >= 100,
        progress_label: Some(|p| format!("{}/100", p.total_work)),
    },
    Achievement {
        id: "first_break",
        name: "Первый перерыв",
        description: "Завершите первый перерыв",
        condition: |p| p.total_break >= 1,
        progress_label: None,
    },
    Achievement {
        id: "fifty_breaks",
        name: "Любитель перерывов",
        description: "Завершите 50 перерывов",
        condition: |p| p.total_break >= 50,
        progress_label: Some(|p| format!("{}/50", p.total_break)),
    },
    Achievement {
        id: "junior_fan",
        name: "Фанат Junior",
        description: "Завершите 15 сессий в режиме Junior",
        condition: |p| p.work_by_mode.junior >= 15,
        progress_label: Some(|p| format!("{}/15", p.work_by_mode.junior)),
    },
    Achievement {
        id: "middle_master",
        name: "Мастер Middle",
        description: "Завершите 30 сессий в режиме Middle",
        condition: |p| p.work_by_mode.middle >= 30,
        progress_label: Some(|p| format!("{}/30", p.work_by_mode.middle)),
    },
    Achievement {
        id: "senior_challenge",
        name: "Вызов Senior",
        description: "Завершите хотя бы одну сессию в режиме Senior",
        condition: |p| p.work_by_mode.senior >= 1,
        progress_label: None,
    },
    Achievement {
        id: "week_streak",
        name: "Недельный стрик",
        description: "Достигните 7-дневного стрика",
        condition: |p| p.streak >= 7,
        progress_label: Some(|p| format!("{}/7", p.streak)),
    },
];

/// Evaluate every rule, in table order.
pub fn evaluate_all(progress: &Progress) -> Vec<AchievementState> {
    ACHIEVEMENTS.iter().map(|a| a.evaluate(progress)).collect()
}

/// Rules unlocked in `after` that were still locked in `before`.
pub fn newly_unlocked(before: &Progress, after: &Progress) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| !(a.condition)(before) && (a.condition)(after))
        .collect()
}
