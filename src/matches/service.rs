use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::models::{MatchFields, MatchModel, MatchType};
use super::repository::MatchRepository;
use super::types::{
    CreateMatchRequest, MatchDetailResponse, MatchTotals, UpdateMatchRequest,
};
use crate::performance::{PerformanceModel, PerformanceRepository, PlayerEntry};
use crate::shared::AppError;
use crate::stats::score::{club_score, Scoreline, MAX_GOALS_PER_MATCH, UNPLAYED_RESULT};
use crate::stats::Venue;

/// Service for fixtures, results and match sheets
pub struct MatchService {
    matches: Arc<dyn MatchRepository + Send + Sync>,
    performances: Arc<dyn PerformanceRepository + Send + Sync>,
    club_name: String,
}

impl MatchService {
    pub fn new(
        matches: Arc<dyn MatchRepository + Send + Sync>,
        performances: Arc<dyn PerformanceRepository + Send + Sync>,
        club_name: impl Into<String>,
    ) -> Self {
        Self {
            matches,
            performances,
            club_name: club_name.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_matches(&self) -> Result<Vec<MatchModel>, AppError> {
        self.matches.list_matches().await
    }

    #[instrument(skip(self))]
    pub async fn get_match_detail(&self, match_id: &str) -> Result<MatchDetailResponse, AppError> {
        let fixture = self.require_match(match_id).await?;
        let rows = self.performances.list_for_match(match_id).await?;
        Ok(self.detail(fixture, rows))
    }

    /// Stores the fixture, then one row per present player
    #[instrument(skip(self, request), fields(away_team = %request.away_team))]
    pub async fn create_match(
        &self,
        request: CreateMatchRequest,
        created_by: Option<String>,
    ) -> Result<MatchDetailResponse, AppError> {
        let fields = self.match_fields(
            request.date,
            request.time,
            request.home_team,
            request.away_team,
            request.result,
            request.match_type,
            request.notes,
        )?;
        validate_players(&request.players)?;

        let fixture = MatchModel::new(fields, created_by);
        self.matches.create_match(&fixture).await?;

        let rows = present_rows(&fixture.id, &request.players);
        self.performances.create_performances(&rows).await?;

        info!(
            match_id = %fixture.id,
            attendees = rows.len(),
            "Match created"
        );
        Ok(self.detail(fixture, rows))
    }

    #[instrument(skip(self, request))]
    pub async fn update_match(
        &self,
        match_id: &str,
        request: UpdateMatchRequest,
    ) -> Result<MatchDetailResponse, AppError> {
        let fields = self.match_fields(
            request.date,
            request.time,
            request.home_team,
            request.away_team,
            request.result,
            request.match_type,
            request.notes,
        )?;
        if let Some(players) = &request.players {
            validate_players(players)?;
        }

        let mut fixture = self.require_match(match_id).await?;
        fixture.apply(fields);
        self.matches.update_match(&fixture).await?;

        let rows = match request.players {
            Some(players) => self.store_sheet(match_id, &players).await?,
            None => self.performances.list_for_match(match_id).await?,
        };

        info!(match_id = %match_id, "Match updated");
        Ok(self.detail(fixture, rows))
    }

    /// Swaps the whole match sheet for the present players in `players`
    #[instrument(skip(self, players))]
    pub async fn replace_performances(
        &self,
        match_id: &str,
        players: Vec<PlayerEntry>,
    ) -> Result<MatchDetailResponse, AppError> {
        validate_players(&players)?;
        let fixture = self.require_match(match_id).await?;
        let rows = self.store_sheet(match_id, &players).await?;

        info!(match_id = %match_id, attendees = rows.len(), "Match sheet replaced");
        Ok(self.detail(fixture, rows))
    }

    /// Removes the match sheet first, then the fixture
    #[instrument(skip(self))]
    pub async fn delete_match(&self, match_id: &str) -> Result<(), AppError> {
        self.require_match(match_id).await?;

        let removed = self.performances.delete_for_match(match_id).await?;
        self.matches.delete_match(match_id).await?;

        info!(match_id = %match_id, performances_removed = removed, "Match deleted");
        Ok(())
    }

    async fn require_match(&self, match_id: &str) -> Result<MatchModel, AppError> {
        self.matches.get_match(match_id).await?.ok_or_else(|| {
            warn!(match_id = %match_id, "Match not found");
            AppError::NotFound(format!("Match {} not found", match_id))
        })
    }

    async fn store_sheet(
        &self,
        match_id: &str,
        players: &[PlayerEntry],
    ) -> Result<Vec<PerformanceModel>, AppError> {
        self.performances.delete_for_match(match_id).await?;
        let rows = present_rows(match_id, players);
        self.performances.create_performances(&rows).await?;
        Ok(rows)
    }

    #[allow(clippy::too_many_arguments)]
    fn match_fields(
        &self,
        date: chrono::NaiveDate,
        time: chrono::NaiveTime,
        home_team: Option<String>,
        away_team: String,
        result: Option<String>,
        match_type: Option<MatchType>,
        notes: Option<String>,
    ) -> Result<MatchFields, AppError> {
        let away_team = away_team.trim().to_string();
        if away_team.is_empty() {
            return Err(AppError::Validation("Away team is required".to_string()));
        }

        let home_team = non_empty(home_team).unwrap_or_else(|| self.club_name.clone());

        Ok(MatchFields {
            date,
            time,
            home_team,
            away_team,
            result: normalize_result(result)?,
            match_type,
            notes: non_empty(notes),
        })
    }

    fn detail(&self, fixture: MatchModel, rows: Vec<PerformanceModel>) -> MatchDetailResponse {
        let mut players: Vec<PerformanceModel> = rows.into_iter().filter(|r| r.present).collect();
        players.sort_by(|a, b| b.goals.cmp(&a.goals));

        let totals = players.iter().fold(MatchTotals::default(), |mut acc, row| {
            acc.goals = acc.goals.saturating_add(row.goals);
            acc.corners = acc.corners.saturating_add(row.corners);
            acc.penalties = acc.penalties.saturating_add(row.penalties);
            acc
        });

        let venue = Venue::for_club(&fixture, &self.club_name);
        let score = club_score(&fixture, &self.club_name);

        MatchDetailResponse {
            opponent: venue.opponent(&fixture).to_string(),
            venue,
            score,
            outcome: score.map(|s| s.outcome()),
            attendees: players.len(),
            players,
            totals,
            fixture,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Stores "H-A" without padding; blank means no result and "-" stays as the
/// not-played marker.
fn normalize_result(result: Option<String>) -> Result<Option<String>, AppError> {
    let Some(raw) = non_empty(result) else {
        return Ok(None);
    };
    if raw == UNPLAYED_RESULT {
        return Ok(Some(raw));
    }

    match Scoreline::parse(&raw)? {
        Some(score) => Ok(Some(score.to_string())),
        None => Ok(None),
    }
}

fn validate_players(players: &[PlayerEntry]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for entry in players {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Player name is required".to_string()));
        }
        if !seen.insert(name) {
            return Err(AppError::Validation(format!(
                "Player {} is listed more than once",
                name
            )));
        }
        if [entry.goals, entry.penalties, entry.corners]
            .iter()
            .any(|count| *count > MAX_GOALS_PER_MATCH)
        {
            return Err(AppError::Validation(format!(
                "Counts for {} must be at most {}",
                name, MAX_GOALS_PER_MATCH
            )));
        }
    }
    Ok(())
}

fn present_rows(match_id: &str, players: &[PlayerEntry]) -> Vec<PerformanceModel> {
    players
        .iter()
        .filter(|entry| entry.present)
        .map(|entry| PerformanceModel::new(match_id, entry))
        .collect()
}
