//! Encoding of the persisted [`Progress`] record.
//!
//! A stored record that cannot be decoded is treated as absent: local
//! progress silently resets to zero rather than failing the caller.

use tracing::warn;

use super::model::Progress;
use crate::error::Result;

pub fn encode(progress: &Progress) -> Result<String> {
    Ok(serde_json::to_string(progress)?)
}

pub fn decode(raw: &str) -> Result<Progress> {
    Ok(serde_json::from_str(raw)?)
}

/// Decode a stored record, falling back to the all-zero default when it is
/// missing or corrupt.
pub fn decode_or_default(raw: Option<&str>) -> Progress {
    let Some(raw) = raw else {
        return Progress::default();
    };
    match decode(raw) {
        Ok(progress) => progress,
        Err(e) => {
            warn!(error = %e, "stored progress is unreadable, starting from zero");
            Progress::default()
        }
    }
}
