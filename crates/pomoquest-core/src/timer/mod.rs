mod engine;
mod profile;
mod ticker;

pub use engine::{TimerEngine, TimerState};
pub use profile::{format_clock, Phase, Profile};
pub use ticker::{
    TickSignal, Ticker, DEFAULT_ROTATION_INTERVAL, DEFAULT_TICK_INTERVAL,
};
