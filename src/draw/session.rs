//! Draw results: cards, batch sessions and free-form winner records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::rarity::Rarity;
use crate::pool::{lenient_id, Prize, PrizeTemplate};

/// One slot of a batch draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawCard {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Uuid,
    /// Winner's name, `None` for a "thank you" slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    pub prize_name: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub rarity: Rarity,
}

impl DrawCard {
    /// A slot won by `winner`
    pub fn winning(winner: String, prize: &Prize, rarity: Rarity) -> Self {
        Self {
            id: Uuid::new_v4(),
            winner: Some(winner),
            prize_name: prize.name.clone(),
            description: prize.description.clone(),
            image: prize.image.clone(),
            rarity,
        }
    }

    /// A non-winning slot
    pub fn thank_you(label: &str, template: &PrizeTemplate) -> Self {
        Self {
            id: Uuid::new_v4(),
            winner: None,
            prize_name: label.to_string(),
            description: template.description.clone(),
            image: template.image.clone(),
            rarity: Rarity::Common,
        }
    }

    pub fn is_winner(&self) -> bool {
        self.winner.is_some()
    }
}

/// Immutable record of one batch draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawSession {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Uuid,
    #[serde(deserialize_with = "lenient_time")]
    pub time: DateTime<Utc>,
    pub cards: Vec<DrawCard>,
}

impl DrawSession {
    pub fn new(cards: Vec<DrawCard>) -> Self {
        Self {
            id: Uuid::new_v4(),
            time: Utc::now(),
            cards,
        }
    }

    pub fn winning_cards(&self) -> impl Iterator<Item = &DrawCard> {
        self.cards.iter().filter(|card| card.is_winner())
    }

    /// Winner names in slot order
    pub fn winner_names(&self) -> Vec<&str> {
        self.cards
            .iter()
            .filter_map(|card| card.winner.as_deref())
            .collect()
    }

    pub fn winner_count(&self) -> usize {
        self.winning_cards().count()
    }

    /// Highest rarity among winning cards
    pub fn best_rarity(&self) -> Option<Rarity> {
        self.winning_cards().map(|card| card.rarity).max()
    }

    pub fn card(&self, id: Uuid) -> Option<&DrawCard> {
        self.cards.iter().find(|card| card.id == id)
    }
}

/// Result of a free-form draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnerRecord {
    /// Prize label at the time of the draw (may be blank)
    #[serde(default)]
    pub prize: String,
    pub names: Vec<String>,
    #[serde(deserialize_with = "lenient_time")]
    pub time: DateTime<Utc>,
}

impl WinnerRecord {
    pub fn new(prize: String, names: Vec<String>) -> Self {
        Self {
            prize,
            names,
            time: Utc::now(),
        }
    }
}

/// What a single `draw()` produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum DrawOutcome {
    /// Batch draw; always produced, even with no winners
    Session(DrawSession),
    /// Free-form draw with at least one winner
    Winners(WinnerRecord),
    /// Free-form draw with nobody left to draw
    Empty,
}

impl DrawOutcome {
    pub fn winner_names(&self) -> Vec<&str> {
        match self {
            DrawOutcome::Session(session) => session.winner_names(),
            DrawOutcome::Winners(record) => record.names.iter().map(String::as_str).collect(),
            DrawOutcome::Empty => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.winner_names().is_empty()
    }
}

/// Accept RFC 3339 timestamps; older saves stored locale-formatted strings,
/// which restore as the epoch instead of failing the whole snapshot
fn lenient_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(DateTime::parse_from_rfc3339(&raw)
        .map(|time| time.with_timezone(&Utc))
        .unwrap_or_else(|_| {
            log::debug!("Unrecognized timestamp {:?}, using epoch", raw);
            DateTime::<Utc>::default()
        }))
}
