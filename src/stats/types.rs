use serde::{Deserialize, Serialize};

use super::results::{MatchTypeFilter, ResultsRecord};
use super::summary::{SeasonHighlights, SeasonSummary};
use super::{forecast::NextMatchForecast, Leaderboard, PlayerTotals};

/// Largest leaderboard a client may ask for
pub const MAX_LEADERBOARD_LIMIT: usize = 100;

/// `?type=league|cup|friendly|all&limit=N`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsQuery {
    #[serde(rename = "type")]
    pub match_type: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatsResponse {
    pub filter: MatchTypeFilter,
    pub players: Vec<PlayerTotals>,
    pub max_appearances: u32,
    pub max_goals: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub club_name: String,
    pub summary: SeasonSummary,
    pub highlights: SeasonHighlights,
    pub record: ResultsRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardsResponse {
    pub filter: MatchTypeFilter,
    pub limit: usize,
    pub leaderboards: Vec<Leaderboard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextMatchResponse {
    pub next_match: Option<NextMatchForecast>,
}
