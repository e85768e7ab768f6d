use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    aggregate::aggregate_player_totals,
    forecast::{forecast_next_match, NextMatchForecast},
    rankings::{default_rankings, leaderboard, Ranking},
    results::{results_report, MatchTypeFilter, ResultsReport},
    summary::{season_highlights, season_summary},
    types::{LeaderboardsResponse, OverviewResponse, PlayerStatsResponse},
    PlayerTotals,
};
use crate::matches::{MatchRepository, MatchType};
use crate::performance::PerformanceRepository;
use crate::shared::AppError;

/// Read-only statistics over the stored fixtures and match sheets.
/// Everything is recomputed from the full lists on each call.
pub struct StatsService {
    matches: Arc<dyn MatchRepository + Send + Sync>,
    performances: Arc<dyn PerformanceRepository + Send + Sync>,
    club_name: String,
    rankings: Vec<Arc<dyn Ranking>>,
}

impl StatsService {
    pub fn builder(
        matches: Arc<dyn MatchRepository + Send + Sync>,
        performances: Arc<dyn PerformanceRepository + Send + Sync>,
        club_name: impl Into<String>,
    ) -> StatsServiceBuilder {
        StatsServiceBuilder::new(matches, performances, club_name.into())
    }

    pub fn rankings(&self) -> &[Arc<dyn Ranking>] {
        &self.rankings
    }

    /// Totals per player, limited to performances in matches of the filtered type
    #[instrument(skip(self))]
    pub async fn player_totals(
        &self,
        filter: MatchTypeFilter,
    ) -> Result<Vec<PlayerTotals>, AppError> {
        let rows = self.performances.list_performances().await?;

        let totals = match filter {
            MatchTypeFilter::All => aggregate_player_totals(&rows),
            MatchTypeFilter::Only(_) => {
                let types = self.match_types().await?;
                aggregate_player_totals(rows.iter().filter(|row| {
                    filter.accepts(types.get(row.match_id.as_str()).copied().flatten())
                }))
            }
        };

        debug!(rows = rows.len(), players = totals.len(), "Aggregated player totals");
        Ok(totals)
    }

    #[instrument(skip(self))]
    pub async fn players(&self, filter: MatchTypeFilter) -> Result<PlayerStatsResponse, AppError> {
        let players = self.player_totals(filter).await?;

        Ok(PlayerStatsResponse {
            filter,
            max_appearances: players.iter().map(|p| p.appearances).max().unwrap_or(0),
            max_goals: players.iter().map(|p| p.goals).max().unwrap_or(0),
            players,
        })
    }

    #[instrument(skip(self))]
    pub async fn overview(&self) -> Result<OverviewResponse, AppError> {
        let totals = self.player_totals(MatchTypeFilter::All).await?;
        let matches = self.matches.list_matches().await?;
        let results = results_report(&matches, &self.club_name, MatchTypeFilter::All);

        Ok(OverviewResponse {
            club_name: self.club_name.clone(),
            summary: season_summary(&totals),
            highlights: season_highlights(&totals),
            record: results.record,
        })
    }

    #[instrument(skip(self))]
    pub async fn leaderboards(
        &self,
        filter: MatchTypeFilter,
        limit: usize,
    ) -> Result<LeaderboardsResponse, AppError> {
        let totals = self.player_totals(filter).await?;

        Ok(LeaderboardsResponse {
            filter,
            limit,
            leaderboards: self
                .rankings
                .iter()
                .map(|ranking| leaderboard(ranking.as_ref(), &totals, limit))
                .collect(),
        })
    }

    #[instrument(skip(self))]
    pub async fn results(&self, filter: MatchTypeFilter) -> Result<ResultsReport, AppError> {
        let matches = self.matches.list_matches().await?;
        Ok(results_report(&matches, &self.club_name, filter))
    }

    #[instrument(skip(self))]
    pub async fn next_match(&self, today: NaiveDate) -> Result<Option<NextMatchForecast>, AppError> {
        let matches = self.matches.list_matches().await?;
        let forecast = forecast_next_match(&matches, &self.club_name, today);

        debug!(found = forecast.is_some(), "Computed next match forecast");
        Ok(forecast)
    }

    async fn match_types(&self) -> Result<HashMap<String, Option<MatchType>>, AppError> {
        let matches = self.matches.list_matches().await?;
        Ok(matches
            .into_iter()
            .map(|model| (model.id, model.match_type))
            .collect())
    }
}

pub struct StatsServiceBuilder {
    matches: Arc<dyn MatchRepository + Send + Sync>,
    performances: Arc<dyn PerformanceRepository + Send + Sync>,
    club_name: String,
    rankings: Vec<Arc<dyn Ranking>>,
}

impl StatsServiceBuilder {
    fn new(
        matches: Arc<dyn MatchRepository + Send + Sync>,
        performances: Arc<dyn PerformanceRepository + Send + Sync>,
        club_name: String,
    ) -> Self {
        Self {
            matches,
            performances,
            club_name,
            rankings: Vec::new(),
        }
    }

    pub fn with_ranking(mut self, ranking: Arc<dyn Ranking>) -> Self {
        self.rankings.push(ranking);
        self
    }

    /// Falls back to the standard leaderboards when none were added
    pub fn build(mut self) -> StatsService {
        if self.rankings.is_empty() {
            self.rankings = default_rankings();
        }

        StatsService {
            matches: self.matches,
            performances: self.performances,
            club_name: self.club_name,
            rankings: self.rankings,
        }
    }
}
