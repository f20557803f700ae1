//! Configuration module
//!
//! Handles draw mode, rarity weights, card labels and storage location.

pub mod settings;

use std::path::PathBuf;

pub use settings::{DrawMode, LabelSettings, Settings, StorageSettings};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}
