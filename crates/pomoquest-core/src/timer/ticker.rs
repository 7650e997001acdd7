//! Periodic tick driver.
//!
//! Two independent tokio tasks exist only while the engine is running:
//! a countdown task (one signal per second) and a message-rotation task.
//! Neither task touches engine state; they only send [`TickSignal`]s to the
//! owning loop, which applies them to its [`TimerEngine`].
//!
//! Each arm bumps a generation counter. Signals already queued from a
//! cancelled generation are rejected by [`Ticker::is_current`]. When the
//! engine re-arms its duration while running (a profile switch), only the
//! countdown task is restarted so the new duration gets a full first second.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

use super::engine::TimerEngine;
use super::profile::Phase;
use crate::messages::EncouragementRotation;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickSignal {
    /// One second of countdown elapsed.
    Countdown { generation: u64 },
    /// Next encouragement message to display.
    Message {
        generation: u64,
        text: &'static str,
    },
}

impl TickSignal {
    pub fn generation(&self) -> u64 {
        match self {
            TickSignal::Countdown { generation } | TickSignal::Message { generation, .. } => {
                *generation
            }
        }
    }
}

pub struct Ticker {
    tx: UnboundedSender<TickSignal>,
    tick_interval: Duration,
    rotation_interval: Duration,
    countdown: Option<JoinHandle<()>>,
    messages: Option<JoinHandle<()>>,
    /// Phase the current tasks were armed for; `None` when disarmed.
    armed_for: Option<Phase>,
    /// Engine duration epoch the countdown task was started for.
    armed_epoch: u64,
    generation: u64,
    countdown_generation: u64,
    message_generation: u64,
}

impl Ticker {
    pub fn new(tx: UnboundedSender<TickSignal>) -> Self {
        Self::with_intervals(tx, DEFAULT_TICK_INTERVAL, DEFAULT_ROTATION_INTERVAL)
    }

    pub fn with_intervals(
        tx: UnboundedSender<TickSignal>,
        tick_interval: Duration,
        rotation_interval: Duration,
    ) -> Self {
        Self {
            tx,
            tick_interval,
            rotation_interval,
            countdown: None,
            messages: None,
            armed_for: None,
            armed_epoch: 0,
            generation: 0,
            countdown_generation: 0,
            message_generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_armed(&self) -> bool {
        self.armed_for.is_some()
    }

    /// Number of live task handles (0 or 2).
    pub fn active_tasks(&self) -> usize {
        usize::from(self.countdown.is_some()) + usize::from(self.messages.is_some())
    }

    pub fn is_current(&self, signal: &TickSignal) -> bool {
        let current = match signal {
            TickSignal::Countdown { .. } => self.countdown_generation,
            TickSignal::Message { .. } => self.message_generation,
        };
        self.is_armed() && signal.generation() == current
    }

    /// Bring the tasks in line with the engine: disarm when idle, re-arm when
    /// the (running, phase) pair changed, restart the countdown when the
    /// engine re-armed its duration. Must be called from within a tokio
    /// runtime after every engine command.
    pub fn sync(&mut self, engine: &TimerEngine) {
        let wanted = engine.is_running().then(|| engine.phase());
        if wanted != self.armed_for {
            self.cancel();
            if let Some(phase) = wanted {
                self.arm(phase);
            }
        } else if self.is_armed() && engine.duration_epoch() != self.armed_epoch {
            self.restart_countdown();
        }
        self.armed_epoch = engine.duration_epoch();
    }

    /// Abort both tasks. Safe to call when nothing is armed.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
        if let Some(handle) = self.messages.take() {
            handle.abort();
        }
        if self.armed_for.take().is_some() {
            debug!(generation = self.generation, "ticker cancelled");
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn arm(&mut self, phase: Phase) {
        let generation = self.next_generation();
        self.spawn_countdown(generation);
        self.spawn_messages(phase, generation);
        self.armed_for = Some(phase);
        debug!(generation, %phase, "ticker armed");
    }

    fn restart_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
        let generation = self.next_generation();
        self.spawn_countdown(generation);
        debug!(generation, "countdown restarted");
    }

    fn spawn_countdown(&mut self, generation: u64) {
        let tx = self.tx.clone();
        let period = self.tick_interval;
        self.countdown_generation = generation;
        self.countdown = Some(tokio::spawn(async move {
            // First signal after one full period, not immediately.
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(TickSignal::Countdown { generation }).is_err() {
                    break;
                }
            }
        }));
    }

    fn spawn_messages(&mut self, phase: Phase, generation: u64) {
        let tx = self.tx.clone();
        let period = self.rotation_interval;
        self.messages = Some(tokio::spawn(async move {
            let mut rotation = EncouragementRotation::new(phase);
            let mut interval = time::interval(period);
            loop {
                interval.tick().await;
                let text = rotation.next_message();
                if tx.send(TickSignal::Message { generation, text }).is_err() {
                    break;
                }
            }
        }));
        self.message_generation = generation;
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
