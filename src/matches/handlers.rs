use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::MatchModel,
    service::MatchService,
    types::{
        CreateMatchRequest, MatchDetailResponse, ReplacePerformancesRequest, RosterResponse,
        UpdateMatchRequest,
    },
};
use crate::auth::AuthUser;
use crate::shared::{AppError, AppState};

fn match_service(state: &AppState) -> MatchService {
    MatchService::new(
        Arc::clone(&state.match_repository),
        Arc::clone(&state.performance_repository),
        state.config.club_name.clone(),
    )
}

/// GET /matches
#[instrument(skip(state))]
pub async fn list_matches(
    State(state): State<AppState>,
) -> Result<Json<Vec<MatchModel>>, AppError> {
    let matches = match_service(&state).list_matches().await?;
    info!(count = matches.len(), "Listed matches");
    Ok(Json(matches))
}

/// GET /matches/{id}
#[instrument(skip(state))]
pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchDetailResponse>, AppError> {
    let detail = match_service(&state).get_match_detail(&match_id).await?;
    Ok(Json(detail))
}

/// POST /matches (admin)
#[instrument(skip(state, user, request), fields(admin = %user.email))]
pub async fn create_match(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<MatchDetailResponse>), AppError> {
    let detail = match_service(&state)
        .create_match(request, Some(user.profile_id.clone()))
        .await?;

    info!(match_id = %detail.fixture.id, "Match created via API");
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /matches/{id} (admin)
#[instrument(skip(state, request))]
pub async fn update_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<UpdateMatchRequest>,
) -> Result<Json<MatchDetailResponse>, AppError> {
    let detail = match_service(&state).update_match(&match_id, request).await?;
    Ok(Json(detail))
}

/// PUT /matches/{id}/performances (admin)
#[instrument(skip(state, request))]
pub async fn replace_performances(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<ReplacePerformancesRequest>,
) -> Result<Json<MatchDetailResponse>, AppError> {
    let detail = match_service(&state)
        .replace_performances(&match_id, request.players)
        .await?;
    Ok(Json(detail))
}

/// DELETE /matches/{id} (admin)
#[instrument(skip(state))]
pub async fn delete_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<StatusCode, AppError> {
    match_service(&state).delete_match(&match_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /roster
pub async fn roster(State(state): State<AppState>) -> Json<RosterResponse> {
    Json(RosterResponse {
        club_name: state.config.club_name.clone(),
        players: state.config.roster.clone(),
    })
}
