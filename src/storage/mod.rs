//! Persistence adapter
//!
//! Stores hold one serialized [`Snapshot`] under a key. The engine never
//! reads or writes storage itself; [`crate::Raffle`] hands it copies.

pub mod file;
pub mod snapshot;

use std::path::PathBuf;

use crate::draw::rule::Rule;

pub use file::{JsonFileStore, MemoryStore};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};

/// Backend holding the serialized snapshot
pub trait SnapshotStore {
    /// Raw stored text, `None` when nothing was saved yet
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored text
    fn write(&mut self, contents: &str) -> Result<(), StorageError>;

    /// Drop the stored text
    fn clear(&mut self) -> Result<(), StorageError>;

    /// Load the stored snapshot
    ///
    /// Unreadable, malformed or unsupported data counts as "no prior state"
    /// and is only logged.
    fn load_snapshot(&self, default_rule: &Rule) -> Option<Snapshot> {
        let raw = match self.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read raffle state: {}", e);
                return None;
            }
        };

        match Snapshot::from_json(&raw, default_rule) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("Ignoring stored raffle state: {}", e);
                None
            }
        }
    }

    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let json = snapshot.to_json()?;
        self.write(&json)
    }
}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid snapshot: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Snapshot version {0} is newer than supported")]
    UnsupportedVersion(u32),
}
