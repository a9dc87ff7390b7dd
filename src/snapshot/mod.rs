//! Persistence of the sticky "last known good" snapshot.

mod session;
mod store;

use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::vitals::SanitizedVitals;

pub use session::{parse_reading_timestamp, VitalsSession};
pub use store::JsonSnapshotStore;

/// Durable storage for a single snapshot. Read once at session start,
/// replaced as a whole after every update.
pub trait SnapshotStore: Send + 'static {
    fn load(&self) -> Result<Option<SanitizedVitals>>;
    fn save(&self, vitals: &SanitizedVitals) -> Result<()>;
}

#[derive(Debug, Default)]
struct MemoryState {
    saved: Option<SanitizedVitals>,
    writes: usize,
}

/// In-process store. Clones share the same slot, so a test can keep one
/// handle while the monitor owns another.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(vitals: SanitizedVitals) -> Self {
        let store = Self::default();
        store.lock().saved = Some(vitals);
        store
    }

    pub fn saved(&self) -> Option<SanitizedVitals> {
        self.lock().saved
    }

    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<SanitizedVitals>> {
        Ok(self.lock().saved)
    }

    fn save(&self, vitals: &SanitizedVitals) -> Result<()> {
        let mut state = self.lock();
        state.saved = Some(*vitals);
        state.writes += 1;
        Ok(())
    }
}
