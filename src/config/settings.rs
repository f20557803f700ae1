//! Raffle settings
//!
//! Defines how draws are shaped, which labels the cards carry, and where
//! state is persisted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::draw::rarity::RarityWeights;
use crate::draw::rule::Rule;
use crate::pool::PrizeTemplate;

/// Number of slots in a ten-pull batch
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Largest batch a single draw will lay out
pub const MAX_BATCH_SIZE: usize = 100;

/// Main settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which drawing variant `draw()` runs
    pub mode: DrawMode,
    /// Slots per batch draw
    pub batch_size: usize,
    /// Upper bound on winners per free-form draw (None = pool size)
    pub free_form_cap: Option<usize>,
    /// Rarity weights for winning cards
    pub rarity_weights: RarityWeights,
    /// Rule restored on reset and used when nothing was persisted
    pub default_rule: Rule,
    /// Description and image for prizes added by name
    pub prize_template: PrizeTemplate,
    /// Card labels
    pub labels: LabelSettings,
    /// Persistence settings
    pub storage: StorageSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: DrawMode::Batch,
            batch_size: DEFAULT_BATCH_SIZE,
            free_form_cap: None,
            rarity_weights: RarityWeights::default(),
            default_rule: Rule::default(),
            prize_template: PrizeTemplate::default(),
            labels: LabelSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}

impl Settings {
    /// Settings for the card-grid "ten-pull" stage
    pub fn ten_pull_preset() -> Self {
        Self {
            mode: DrawMode::Batch,
            batch_size: DEFAULT_BATCH_SIZE,
            ..Default::default()
        }
    }

    /// Settings for the rolling-name stage, where any number may win at once
    pub fn free_form_preset() -> Self {
        Self {
            mode: DrawMode::FreeForm,
            free_form_cap: None,
            default_rule: Rule {
                prize_name: String::new(),
                winner_count: 1,
                remove_winner: true,
            },
            storage: StorageSettings {
                key: "raffle-data-v1".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Location of the snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.storage.data_dir.join(format!("{}.json", self.storage.key))
    }

    fn sanitized(mut self) -> Self {
        if self.batch_size == 0 {
            log::warn!("batch_size of 0 is not usable, using {}", DEFAULT_BATCH_SIZE);
            self.batch_size = DEFAULT_BATCH_SIZE;
        }
        if self.batch_size > MAX_BATCH_SIZE {
            log::warn!(
                "batch_size of {} is too large, using {}",
                self.batch_size,
                MAX_BATCH_SIZE
            );
            self.batch_size = MAX_BATCH_SIZE;
        }
        if self.free_form_cap == Some(0) {
            log::warn!("free_form_cap of 0 would block every draw, ignoring it");
            self.free_form_cap = None;
        }
        if self.rarity_weights.total() <= 0.0 {
            log::warn!("Rarity weights sum to zero, using defaults");
            self.rarity_weights = RarityWeights::default();
        }
        self
    }
}

/// Drawing variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    /// Fixed-size card batch with winning and "thank you" slots
    Batch,
    /// Pick names from the remaining pool
    FreeForm,
}

/// Text shown on cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    /// Prize label on non-winning slots
    pub thank_you: String,
    /// Prize label when the rule's prize name is blank
    pub fallback_prize: String,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            thank_you: "Thanks for participating".to_string(),
            fallback_prize: "Grand Prize".to_string(),
        }
    }
}

/// Where snapshots are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Snapshot key, also used as the file stem
    pub key: String,
    /// Directory holding snapshot files
    pub data_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            key: "nianhui-raffle-v1".to_string(),
            data_dir: PathBuf::from("."),
        }
    }
}
