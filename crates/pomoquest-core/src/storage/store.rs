//! Whole-record persistence for [`Progress`].

use std::cell::RefCell;

use crate::error::Result;
use crate::progress::{codec, Progress};

/// Key under which the progress record is stored.
pub const PROGRESS_KEY: &str = "pomodoroAchievementsProgress";

/// Key under which the opaque push subscription is stored.
pub const SUBSCRIPTION_KEY: &str = "pushSubscription";

/// Storage backend for the progress record.
///
/// `load` never fails: unreadable or corrupt data yields the default record.
/// `save` always overwrites the whole record.
pub trait ProgressStore {
    fn load(&self) -> Progress;
    fn save(&self, progress: &Progress) -> Result<()>;
}

impl<S: ProgressStore + ?Sized> ProgressStore for &S {
    fn load(&self) -> Progress {
        (**self).load()
    }

    fn save(&self, progress: &Progress) -> Result<()> {
        (**self).save(progress)
    }
}

/// In-memory store holding the encoded record, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: RefCell<Option<String>>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with an arbitrary (possibly corrupt) encoded record.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RefCell::new(Some(raw.into())),
            saves: RefCell::new(0),
        }
    }

    /// How many times `save` has been called.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Progress {
        codec::decode_or_default(self.raw.borrow().as_deref())
    }

    fn save(&self, progress: &Progress) -> Result<()> {
        *self.raw.borrow_mut() = Some(codec::encode(progress)?);
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}
