mod config;
pub mod database;
mod store;

pub use config::{Config, NotificationsConfig, PushConfig, TimerConfig};
pub use database::Database;
pub use store::{MemoryStore, ProgressStore, PROGRESS_KEY, SUBSCRIPTION_KEY};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/pomoquest[-dev]/` based on POMOQUEST_ENV.
///
/// Set POMOQUEST_ENV=dev to use development data directory.
/// POMOQUEST_DATA_DIR overrides the location entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("POMOQUEST_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("POMOQUEST_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("pomoquest-dev")
            } else {
                base_dir.join("pomoquest")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
