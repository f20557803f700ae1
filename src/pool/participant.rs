//! Raffle participants

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Named;

/// Someone eligible to win
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default = "Uuid::new_v4", deserialize_with = "super::lenient_id")]
    pub id: Uuid,
    pub name: String,
}

impl Participant {
    /// Create a participant with a fresh id
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

impl Named for Participant {
    fn name(&self) -> &str {
        &self.name
    }
}
