//! Persisted raffle state
//!
//! The on-disk schema carries a `version` tag. Saves written before the tag
//! existed (version 0) come in two shapes: the card-grid stage stored
//! participant objects, while the rolling-name stage stored bare name
//! strings together with `prize` and `remove` keys. Both are migrated here.

use serde::{Deserialize, Serialize};

use super::StorageError;
use crate::draw::rule::{Rule, RulePatch};
use crate::draw::session::{DrawSession, WinnerRecord};
use crate::pool::{Participant, Prize};

/// Schema version written by this build
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized engine state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub participants: Vec<Participant>,
    pub prizes: Vec<Prize>,
    pub rule: Rule,
    /// Batch sessions, newest first
    pub sessions: Vec<DrawSession>,
    /// Free-form remaining pool; `None` means "all participants"
    pub remaining: Option<Vec<String>>,
    /// Free-form results, oldest first
    pub winners: Vec<WinnerRecord>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            participants: Vec::new(),
            prizes: Vec::new(),
            rule: Rule::default(),
            sessions: Vec::new(),
            remaining: None,
            winners: Vec::new(),
        }
    }
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse any supported schema version
    ///
    /// Missing fields are filled from `default_rule` or left empty.
    pub fn from_json(json: &str, default_rule: &Rule) -> Result<Self, StorageError> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        raw.migrate(default_rule)
    }
}

/// Participants were saved either as objects or as bare names
#[derive(Deserialize)]
#[serde(untagged)]
enum ParticipantEntry {
    Full(Participant),
    Name(String),
}

impl ParticipantEntry {
    fn into_participant(self) -> Participant {
        match self {
            ParticipantEntry::Full(participant) => participant,
            ParticipantEntry::Name(name) => Participant::new(name),
        }
    }
}

/// Every field optional, so that any older or partial save can be read
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawSnapshot {
    version: Option<u32>,
    participants: Vec<ParticipantEntry>,
    prizes: Vec<Prize>,
    rule: Option<RulePatch>,
    sessions: Vec<DrawSession>,
    remaining: Option<Vec<String>>,
    winners: Vec<WinnerRecord>,
    // Version 0 rolling-name keys
    prize: Option<String>,
    remove: Option<bool>,
}

impl RawSnapshot {
    fn migrate(self, default_rule: &Rule) -> Result<Snapshot, StorageError> {
        let version = self.version.unwrap_or(0);
        if version > SNAPSHOT_VERSION {
            return Err(StorageError::UnsupportedVersion(version));
        }

        let mut rule = default_rule.clone();
        if let Some(patch) = self.rule {
            rule.apply(patch);
        }
        if version == 0 {
            rule.apply(RulePatch {
                prize_name: self.prize,
                remove_winner: self.remove,
                ..Default::default()
            });
        }

        Ok(Snapshot {
            version: SNAPSHOT_VERSION,
            participants: self
                .participants
                .into_iter()
                .map(ParticipantEntry::into_participant)
                .collect(),
            prizes: self.prizes,
            rule,
            sessions: self.sessions,
            remaining: self.remaining,
            winners: self.winners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::PrizeTemplate;

    fn names(snapshot: &Snapshot) -> Vec<&str> {
        snapshot
            .participants
            .iter()
            .map(|p| p.name.as_str())
            .collect()
    }

    #[test]
    fn test_roundtrip() {
        let template = PrizeTemplate::default();
        let snapshot = Snapshot {
            participants: ["A", "B", "C"]
                .into_iter()
                .map(|n| Participant::new(n.into()))
                .collect(),
            prizes: vec![Prize::new("P1".into(), &template)],
            rule: Rule {
                prize_name: "X".into(),
                winner_count: 2,
                remove_winner: true,
            },
            ..Default::default()
        };

        let json = snapshot.to_json().unwrap();
        let restored = Snapshot::from_json(&json, &Rule::default()).unwrap();

        assert_eq!(restored, snapshot);
        assert!(restored.sessions.is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let snapshot = Snapshot::from_json(r#"{"version":1}"#, &Rule::default()).unwrap();
        assert!(snapshot.participants.is_empty());
        assert!(snapshot.prizes.is_empty());
        assert_eq!(snapshot.rule, Rule::default());
        assert_eq!(snapshot.remaining, None);
    }

    #[test]
    fn test_partial_rule_keeps_defaults() {
        let json = r#"{"version":1,"rule":{"winnerCount":3}}"#;
        let snapshot = Snapshot::from_json(json, &Rule::default()).unwrap();
        assert_eq!(snapshot.rule.winner_count, 3);
        assert_eq!(snapshot.rule.prize_name, "Grand Prize");
    }

    #[test]
    fn test_card_grid_legacy_save() {
        let json = r#"{
            "participants": [{"id": "7f1d3c52-3c1a-4a47-9a5e-0d3f7f3b9a10", "name": "A"}],
            "prizes": [],
            "rule": {"prizeName": "Bike", "winnerCount": 5, "removeWinner": false},
            "sessions": []
        }"#;
        let snapshot = Snapshot::from_json(json, &Rule::default()).unwrap();

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(names(&snapshot), vec!["A"]);
        assert_eq!(snapshot.rule.prize_name, "Bike");
        assert!(!snapshot.rule.remove_winner);
    }

    #[test]
    fn test_rolling_name_legacy_save() {
        let json = r#"{
            "participants": ["A", "B", "C"],
            "remaining": ["C"],
            "winners": [{"prize": "Bike", "names": ["A", "B"], "time": "2024/1/20 19:30:00"}],
            "prize": "Bike",
            "remove": false
        }"#;
        let snapshot = Snapshot::from_json(json, &Rule::default()).unwrap();

        assert_eq!(names(&snapshot), vec!["A", "B", "C"]);
        assert_eq!(snapshot.remaining, Some(vec!["C".to_string()]));
        assert_eq!(snapshot.winners.len(), 1);
        assert_eq!(snapshot.rule.prize_name, "Bike");
        assert!(!snapshot.rule.remove_winner);
    }

    #[test]
    fn test_timestamp_ids_are_replaced() {
        let json = r#"{
            "participants": [
                {"id": "1706000000000", "name": "A"},
                {"name": "B"},
                "C"
            ],
            "prizes": [{"id": "1706000000001", "name": "Bike", "description": "", "image": ""}],
            "sessions": [{
                "id": "1706000000002",
                "time": "2024-01-20T19:30:00Z",
                "cards": [{
                    "id": "1706000000003",
                    "winner": "A",
                    "prizeName": "Bike",
                    "description": "",
                    "image": "",
                    "rarity": "SR"
                }]
            }]
        }"#;
        let snapshot = Snapshot::from_json(json, &Rule::default()).unwrap();

        assert_eq!(names(&snapshot), vec!["A", "B", "C"]);
        assert!(snapshot.participants.iter().all(|p| !p.id.is_nil()));
        assert_eq!(snapshot.prizes[0].name, "Bike");
        assert!(!snapshot.prizes[0].is_placeholder());
        assert_eq!(snapshot.sessions[0].cards[0].winner.as_deref(), Some("A"));
    }

    #[test]
    fn test_future_version_rejected() {
        let result = Snapshot::from_json(r#"{"version":99}"#, &Rule::default());
        assert!(matches!(result, Err(StorageError::UnsupportedVersion(99))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(Snapshot::from_json("{\"participants\": 3", &Rule::default()).is_err());
        assert!(Snapshot::from_json("42", &Rule::default()).is_err());
    }
}
