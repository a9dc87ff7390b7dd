use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::vitals::SanitizedVitals;

use super::SnapshotStore;

const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// Snapshot kept as a single JSON file.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    /// A missing file is an empty store; a corrupt one is logged and treated
    /// the same way.
    fn load(&self) -> Result<Option<SanitizedVitals>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read snapshot from {}", self.path.display()))?;

        match serde_json::from_str(&contents) {
            Ok(vitals) => Ok(Some(vitals)),
            Err(err) => {
                log_warn!(
                    "Ignoring unreadable snapshot at {}: {err}",
                    self.path.display()
                );
                Ok(None)
            }
        }
    }

    fn save(&self, vitals: &SanitizedVitals) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create snapshot directory {}", parent.display())
            })?;
        }

        let serialized = serde_json::to_vec_pretty(vitals).context("Failed to serialize snapshot")?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path)
            .with_context(|| format!("Failed to create {}", temp_path.display()))?;
        file.write_all(&serialized)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        file.sync_all()
            .with_context(|| format!("Failed to sync {}", temp_path.display()))?;

        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to write snapshot to {}", self.path.display()))
    }
}
