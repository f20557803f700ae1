//! Raffle Core - lucky-draw engine for raffle presentation tools
//!
//! This library holds the participant and prize pools, the draw rule, and
//! the draw engine that decides who wins, what they win and how rare the
//! card is. Presentation layers (card grids, rolling-name stages, reveal
//! animations) read its results and send it commands.
//!
//! ## Draw modes
//!
//! - **Batch** ("ten-pull"): a fixed number of slots, some of which are won
//!   by distinct participants, each with a prize and a rarity tier.
//! - **Free-form**: any number of names drawn from a remaining pool that
//!   shrinks across draws.

pub mod config;
pub mod draw;
pub mod pool;
pub mod storage;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Settings;
use crate::draw::{DrawEngine, DrawOutcome, RandomSource, Rule, RulePatch};
use crate::storage::{JsonFileStore, MemoryStore, SnapshotStore, StorageError};

/// A draw engine bound to the store it persists to
pub struct Raffle {
    settings: Settings,
    engine: DrawEngine,
    store: Box<dyn SnapshotStore>,
}

impl Raffle {
    /// Create a raffle, restoring whatever the store holds
    pub fn open(settings: Settings, store: Box<dyn SnapshotStore>) -> Self {
        let mut engine = DrawEngine::new(&settings);

        match store.load_snapshot(&settings.default_rule) {
            Some(snapshot) => engine.restore(snapshot),
            None => log::info!("No stored raffle state, starting fresh"),
        }

        Self {
            settings,
            engine,
            store,
        }
    }

    /// Open with the JSON file named by the storage settings
    pub fn open_file(settings: Settings) -> Self {
        let store = JsonFileStore::new(settings.snapshot_path());
        Self::open(settings, Box::new(store))
    }

    /// Open with nothing persisted beyond this process
    pub fn in_memory(settings: Settings) -> Self {
        Self::open(settings, Box::new(MemoryStore::new()))
    }

    /// Use a specific random source for all following draws
    pub fn with_random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.engine.set_random_source(rng);
        self
    }

    /// Settings the raffle was opened with
    ///
    /// The engine copies what it needs when the raffle is opened; read live
    /// values such as the mode back from [`Raffle::engine`].
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn engine(&self) -> &DrawEngine {
        &self.engine
    }

    pub fn store(&self) -> &dyn SnapshotStore {
        &*self.store
    }

    /// Run a command and persist the result
    ///
    /// The engine state is committed even if saving fails; the failure is
    /// logged. Use [`Raffle::save`] to observe storage errors directly.
    pub fn apply(&mut self, command: RaffleCommand) -> RaffleEvent {
        let event = self.execute(command);

        match &event {
            RaffleEvent::Unchanged | RaffleEvent::SelectionChanged { .. } => {}
            RaffleEvent::Reset => {
                if let Err(e) = self.store.clear() {
                    log::error!("Failed to clear raffle state: {}", e);
                }
            }
            _ => {
                if let Err(e) = self.save() {
                    log::error!("Failed to save raffle state: {}", e);
                }
            }
        }

        event
    }

    /// Write the current engine state to the store
    pub fn save(&mut self) -> Result<(), StorageError> {
        self.store.save_snapshot(&self.engine.snapshot())
    }

    fn execute(&mut self, command: RaffleCommand) -> RaffleEvent {
        let engine = &mut self.engine;

        let changed = match command {
            RaffleCommand::AddParticipant { name } => engine.add_participant(&name),
            RaffleCommand::AddParticipants { names } => engine.add_participants(&names) > 0,
            RaffleCommand::ReplaceParticipants { names } => {
                engine.replace_participants(&names);
                true
            }
            RaffleCommand::ImportRoster { text } => {
                engine.replace_participants(pool::parse_names(&text));
                true
            }
            RaffleCommand::AddPrize { name } => engine.add_prize(&name),
            RaffleCommand::AddPrizes { names } => engine.add_prizes(&names) > 0,
            RaffleCommand::ResetRemaining => {
                engine.reset_remaining();
                true
            }
            RaffleCommand::UpdateRule { patch } => {
                engine.update_rule(patch);
                return RaffleEvent::RuleUpdated {
                    rule: engine.rule().clone(),
                };
            }
            RaffleCommand::Draw => {
                return RaffleEvent::Drawn {
                    outcome: engine.draw(),
                };
            }
            RaffleCommand::SelectCard { card_id } => {
                if !engine.select_card(card_id) {
                    log::warn!("Cannot select unknown card {}", card_id);
                    return RaffleEvent::Unchanged;
                }
                return RaffleEvent::SelectionChanged {
                    card_id: Some(card_id),
                };
            }
            RaffleCommand::ClearSelection => {
                engine.clear_selection();
                return RaffleEvent::SelectionChanged { card_id: None };
            }
            RaffleCommand::ResetAll => {
                engine.reset();
                return RaffleEvent::Reset;
            }
        };

        if changed {
            RaffleEvent::PoolChanged {
                participants: engine.participant_count(),
                prizes: engine.prize_count(),
                remaining: engine.remaining_count(),
            }
        } else {
            RaffleEvent::Unchanged
        }
    }
}

/// Operations the presentation layer can request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RaffleCommand {
    AddParticipant { name: String },
    AddParticipants { names: Vec<String> },
    /// Replace the participant list and refill the remaining pool
    ReplaceParticipants { names: Vec<String> },
    /// Replace the participant list from pasted text
    ImportRoster { text: String },
    AddPrize { name: String },
    AddPrizes { names: Vec<String> },
    UpdateRule { patch: RulePatch },
    /// Draw in the configured mode
    Draw,
    SelectCard { card_id: Uuid },
    ClearSelection,
    /// Make every participant eligible for free-form draws again
    ResetRemaining,
    /// Clear everything and restore the default rule
    ResetAll,
}

/// What a command changed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RaffleEvent {
    /// Pool sizes after the change
    PoolChanged {
        participants: usize,
        prizes: usize,
        remaining: usize,
    },
    RuleUpdated { rule: Rule },
    Drawn { outcome: DrawOutcome },
    SelectionChanged { card_id: Option<Uuid> },
    Reset,
    /// The command was a no-op
    Unchanged,
}
