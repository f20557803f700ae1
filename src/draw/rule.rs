//! Draw rule and its clamp policies

use serde::{Deserialize, Serialize};

/// Operator-facing draw configuration
///
/// `winner_count` is stored as given; zero or negative values are only
/// clamped when a draw runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rule {
    /// Prize label used when no prize pool exists
    pub prize_name: String,
    /// Winners requested per draw
    pub winner_count: i64,
    /// Remove winners from future draws
    pub remove_winner: bool,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            prize_name: "Grand Prize".to_string(),
            winner_count: 10,
            remove_winner: true,
        }
    }
}

impl Rule {
    /// Merge the fields set in `patch`
    pub fn apply(&mut self, patch: RulePatch) {
        if let Some(prize_name) = patch.prize_name {
            self.prize_name = prize_name;
        }
        if let Some(winner_count) = patch.winner_count {
            self.winner_count = winner_count;
        }
        if let Some(remove_winner) = patch.remove_winner {
            self.remove_winner = remove_winner;
        }
    }

    /// Trimmed prize name, or `fallback` when blank
    pub fn prize_label(&self, fallback: &str) -> String {
        let trimmed = self.prize_name.trim();
        if trimmed.is_empty() {
            fallback.to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Winners in a batch draw: `min(winner_count, slots, pool)`, never negative
    pub fn batch_winner_count(&self, slots: usize, pool_size: usize) -> usize {
        let requested = usize::try_from(self.winner_count.max(0)).unwrap_or(usize::MAX);
        requested.min(slots).min(pool_size)
    }

    /// Winners in a free-form draw: at least one requested, capped by `cap`
    /// and the remaining pool
    pub fn free_form_winner_count(&self, cap: Option<usize>, pool_size: usize) -> usize {
        let requested = usize::try_from(self.winner_count.max(1)).unwrap_or(usize::MAX);
        let capped = cap.map_or(requested, |cap| requested.min(cap));
        capped.min(pool_size)
    }
}

/// Partial rule update; unset fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RulePatch {
    pub prize_name: Option<String>,
    pub winner_count: Option<i64>,
    pub remove_winner: Option<bool>,
}

impl RulePatch {
    pub fn prize_name(name: impl Into<String>) -> Self {
        Self {
            prize_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn winner_count(count: i64) -> Self {
        Self {
            winner_count: Some(count),
            ..Default::default()
        }
    }

    pub fn remove_winner(remove: bool) -> Self {
        Self {
            remove_winner: Some(remove),
            ..Default::default()
        }
    }
}
