//! Configuration types for the featstore crate.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Feature store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base directory for feature snapshots.
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,
    /// Write snapshots as pretty-printed JSON.
    #[serde(default = "default_true")]
    pub pretty_json: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
            pretty_json: true,
        }
    }
}

impl StoreConfig {
    /// Path of the named snapshot under `snapshot_dir`.
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.snapshot_dir.join(format!("{name}.json"))
    }

    pub fn with_snapshot_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            snapshot_dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from(".featstore/snapshots")
}

fn default_true() -> bool {
    true
}
