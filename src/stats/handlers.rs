use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    rankings::DEFAULT_LEADERBOARD_LIMIT,
    results::{MatchTypeFilter, ResultsReport},
    service::StatsService,
    types::{
        LeaderboardsResponse, NextMatchResponse, OverviewResponse, PlayerStatsResponse,
        StatsQuery, MAX_LEADERBOARD_LIMIT,
    },
};
use crate::shared::{AppError, AppState};

fn stats_service(state: &AppState) -> StatsService {
    StatsService::builder(
        Arc::clone(&state.match_repository),
        Arc::clone(&state.performance_repository),
        state.config.club_name.clone(),
    )
    .build()
}

fn parse_filter(query: &StatsQuery) -> Result<MatchTypeFilter, AppError> {
    Ok(MatchTypeFilter::parse(query.match_type.as_deref())?)
}

/// GET /stats/players
#[instrument(skip(state))]
pub async fn player_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<PlayerStatsResponse>, AppError> {
    let filter = parse_filter(&query)?;
    let response = stats_service(&state).players(filter).await?;
    Ok(Json(response))
}

/// GET /stats/overview
#[instrument(skip(state))]
pub async fn overview(State(state): State<AppState>) -> Result<Json<OverviewResponse>, AppError> {
    let response = stats_service(&state).overview().await?;
    Ok(Json(response))
}

/// GET /stats/leaderboards
#[instrument(skip(state))]
pub async fn leaderboards(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<LeaderboardsResponse>, AppError> {
    let filter = parse_filter(&query)?;
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    if limit == 0 || limit > MAX_LEADERBOARD_LIMIT {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {}",
            MAX_LEADERBOARD_LIMIT
        )));
    }

    let response = stats_service(&state).leaderboards(filter, limit).await?;
    Ok(Json(response))
}

/// GET /results
#[instrument(skip(state))]
pub async fn results(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<ResultsReport>, AppError> {
    let filter = parse_filter(&query)?;
    let report = stats_service(&state).results(filter).await?;

    info!(played = report.record.played, "Results report built");
    Ok(Json(report))
}

/// GET /matches/next
#[instrument(skip(state))]
pub async fn next_match(
    State(state): State<AppState>,
) -> Result<Json<NextMatchResponse>, AppError> {
    let today = Utc::now().date_naive();
    let next_match = stats_service(&state).next_match(today).await?;
    Ok(Json(NextMatchResponse { next_match }))
}
