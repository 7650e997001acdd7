//! Session progress, streak tracking and achievements.

mod achievements;
mod clock;
pub mod codec;
mod engine;
mod model;

pub use achievements::{evaluate_all, newly_unlocked, Achievement, AchievementState, ACHIEVEMENTS};
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::ProgressEngine;
pub use model::{ModeCounts, Progress};
