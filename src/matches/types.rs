use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::models::{MatchModel, MatchType};
use crate::performance::{PerformanceModel, PlayerEntry};
use crate::stats::{ClubScore, Outcome, Venue};

/// Body of `POST /matches`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMatchRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub home_team: Option<String>, // defaults to the club
    pub away_team: String,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub match_type: Option<MatchType>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub players: Vec<PlayerEntry>,
}

/// Body of `PUT /matches/{id}`. When `players` is given the match sheet is
/// replaced as well.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMatchRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub home_team: Option<String>,
    pub away_team: String,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub match_type: Option<MatchType>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub players: Option<Vec<PlayerEntry>>,
}

/// Body of `PUT /matches/{id}/performances`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacePerformancesRequest {
    pub players: Vec<PlayerEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchTotals {
    pub goals: u32,
    pub corners: u32,
    pub penalties: u32,
}

/// A fixture with its match sheet, seen from the club's side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetailResponse {
    #[serde(rename = "match")]
    pub fixture: MatchModel,
    pub venue: Venue,
    pub opponent: String,
    pub score: Option<ClubScore>,
    pub outcome: Option<Outcome>,
    pub attendees: usize,
    pub players: Vec<PerformanceModel>,
    pub totals: MatchTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterResponse {
    pub club_name: String,
    pub players: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_optional_fields() {
        let request: CreateMatchRequest = serde_json::from_str(
            r#"{"date": "2025-03-14", "time": "20:30:00", "away_team": "FC Rivals"}"#,
        )
        .unwrap();

        assert_eq!(request.away_team, "FC Rivals");
        assert!(request.home_team.is_none());
        assert!(request.result.is_none());
        assert!(request.match_type.is_none());
        assert!(request.players.is_empty());
    }

    #[test]
    fn test_create_request_rejects_unknown_match_type() {
        let result: Result<CreateMatchRequest, _> = serde_json::from_str(
            r#"{"date": "2025-03-14", "time": "20:30:00", "away_team": "X", "match_type": "beach"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_players_optional() {
        let request: UpdateMatchRequest = serde_json::from_str(
            r#"{"date": "2025-03-14", "time": "20:30:00", "away_team": "FC Rivals", "result": "3-1"}"#,
        )
        .unwrap();

        assert!(request.players.is_none());
        assert_eq!(request.result.as_deref(), Some("3-1"));
    }
}
