//! Prizes and the placeholder used when a prize has no artwork

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Named;

/// Description and image given to prizes added by name only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrizeTemplate {
    pub description: String,
    pub image: String,
}

impl Default for PrizeTemplate {
    fn default() -> Self {
        Self {
            description: "Limited annual prize. Details to be announced.".to_string(),
            image: "/placeholder-prize.svg".to_string(),
        }
    }
}

/// A prize that can be awarded on a winning card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    #[serde(default = "Uuid::new_v4", deserialize_with = "super::lenient_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image: String,
}

impl Prize {
    /// Create a prize with a fresh id and the template's description and image
    pub fn new(name: String, template: &PrizeTemplate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description: template.description.clone(),
            image: template.image.clone(),
        }
    }

    /// Stand-in prize used when the prize pool is empty
    ///
    /// Carries the nil id so it can never collide with a real prize.
    pub fn placeholder(name: String, template: &PrizeTemplate) -> Self {
        Self {
            id: Uuid::nil(),
            ..Self::new(name, template)
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_nil()
    }
}

impl Named for Prize {
    fn name(&self) -> &str {
        &self.name
    }
}
