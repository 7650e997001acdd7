//! # Pomoquest Core Library
//!
//! This library provides the core logic for the Pomoquest Pomodoro timer:
//! a countdown state machine plus a gamified progress tracker. The CLI
//! binary is a thin front-end over the same library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine; the caller (or the
//!   [`Ticker`]) invokes `tick()` once per second while running
//! - **Progress Engine**: Session counters, daily/streak tracking and nine
//!   fixed achievements derived from them
//! - **Storage**: SQLite key-value persistence and TOML configuration
//! - **Notifications**: Local notification hook and push relay client
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`ProgressEngine`]: Sole writer of the persisted [`Progress`] record
//! - [`Session`]: Routes timer completions to progress and notifications
//! - [`Database`]: Key-value persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod messages;
pub mod notify;
pub mod progress;
pub mod session;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, PushError, ValidationError};
pub use events::Event;
pub use notify::{LocalNotifier, NotificationContent, NotificationPermission, Notifier, PushRelayClient};
pub use progress::{AchievementState, Progress, ProgressEngine};
pub use session::{Command, Completion, Session};
pub use storage::{Config, Database, MemoryStore, ProgressStore};
pub use timer::{Phase, Profile, TickSignal, Ticker, TimerEngine, TimerState};
