//! Rarity tiers for winning cards
//!
//! Rarity is presentation flavor only: it decides how loudly a card is
//! revealed, not who wins.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::random::RandomSource;

/// Rarity tier of a card
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Rarity {
    /// Lowest tier, also used for every non-winning slot
    #[default]
    #[serde(rename = "R")]
    Common,
    #[serde(rename = "SR")]
    Rare,
    /// Gets the legendary reveal
    #[serde(rename = "SSR")]
    SuperRare,
}

impl Rarity {
    /// Order in which cumulative weights are walked when sampling
    const SAMPLE_ORDER: [Rarity; 3] = [Rarity::SuperRare, Rarity::Rare, Rarity::Common];

    /// Short badge text
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "R",
            Rarity::Rare => "SR",
            Rarity::SuperRare => "SSR",
        }
    }

    /// Whether the presentation layer should use the legendary reveal
    pub fn is_legendary(&self) -> bool {
        matches!(self, Rarity::SuperRare)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Relative weight of each tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityWeights {
    pub common: f64,
    pub rare: f64,
    pub super_rare: f64,
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self {
            common: 76.0,
            rare: 18.0,
            super_rare: 6.0,
        }
    }
}

impl RarityWeights {
    /// Weight of a tier; negative weights count as zero
    pub fn weight(&self, rarity: Rarity) -> f64 {
        let w = match rarity {
            Rarity::Common => self.common,
            Rarity::Rare => self.rare,
            Rarity::SuperRare => self.super_rare,
        };
        w.max(0.0)
    }

    pub fn total(&self) -> f64 {
        Rarity::SAMPLE_ORDER.iter().map(|r| self.weight(*r)).sum()
    }

    /// Expected share of a tier among winning cards
    pub fn proportion(&self, rarity: Rarity) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }
        self.weight(rarity) / total
    }

    /// Sample a tier
    ///
    /// Rolls uniformly in `[0, total)` and walks the cumulative weights from
    /// the rarest tier down. Rounding that leaves the roll unmatched falls
    /// back to the lowest tier.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> Rarity {
        let roll = rng.next_f64() * self.total();
        let mut cumulative = 0.0;

        for rarity in Rarity::SAMPLE_ORDER {
            cumulative += self.weight(rarity);
            if roll < cumulative {
                return rarity;
            }
        }

        Rarity::Common
    }
}
