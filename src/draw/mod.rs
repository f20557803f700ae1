//! Draw engine module
//!
//! Contains the engine itself plus the pieces it is built from: the rule and
//! its clamp policies, rarity sampling, pluggable randomness, and the result
//! records handed to the presentation layer.

pub mod engine;
pub mod random;
pub mod rarity;
pub mod rule;
pub mod session;

pub use engine::DrawEngine;
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use rarity::{Rarity, RarityWeights};
pub use rule::{Rule, RulePatch};
pub use session::{DrawCard, DrawOutcome, DrawSession, WinnerRecord};
