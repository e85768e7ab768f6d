use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One player's line on a match sheet, as submitted by an admin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    #[serde(default)]
    pub present: bool,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub penalties: u32,
    #[serde(default)]
    pub corners: u32,
}

/// Database model for the player_performances table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceModel {
    pub id: String,
    pub match_id: String,
    pub player_name: String,
    pub present: bool,
    pub goals: u32,
    pub penalties: u32, // goals scored from penalties
    pub corners: u32,   // goals scored from corners
    pub created_at: DateTime<Utc>,
}

impl PerformanceModel {
    pub fn new(match_id: &str, entry: &PlayerEntry) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            match_id: match_id.to_string(),
            player_name: entry.name.trim().to_string(),
            present: entry.present,
            goals: entry.goals,
            penalties: entry.penalties,
            corners: entry.corners,
            created_at: Utc::now(),
        }
    }
}
