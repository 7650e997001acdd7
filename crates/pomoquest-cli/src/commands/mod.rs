pub mod achievements;
pub mod config;
pub mod progress;
pub mod push;
pub mod timer;

mod terminal;
