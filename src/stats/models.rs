use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Season totals for one player, summed over the matches they attended
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerTotals {
    pub player_name: String,
    pub appearances: u32,
    pub goals: u32,
    pub penalties: u32,
    pub corners: u32,
}

impl PlayerTotals {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            ..Self::default()
        }
    }

    pub fn goals_per_game(&self) -> Option<f64> {
        (self.appearances > 0).then(|| self.goals as f64 / self.appearances as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RankingCategory {
    Goals,
    GoalsPerGame,
    Corners,
    Penalties,
    Appearances,
}

/// A ranked figure: plain counts or a ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(u32),
    Ratio(f64),
}

impl StatValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            StatValue::Count(count) => *count as f64,
            StatValue::Ratio(ratio) => *ratio,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.as_f64() == 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub player_name: String,
    pub value: StatValue,
    pub appearances: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub category: RankingCategory,
    pub entries: Vec<RankingEntry>,
}

/// Rounds for display, e.g. `round_to(1.666, 2) == 1.67`
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
