use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::AuthService,
    types::{
        AuthResponse, AuthUser, LoginRequest, ProfileResponse, SignUpRequest, UpdateRoleRequest,
    },
};
use crate::shared::{AppError, AppState};

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(
        Arc::clone(&state.profile_repository),
        Arc::clone(&state.config),
    )
}

/// POST /auth/signup
#[instrument(name = "sign_up", skip(state, request))]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = auth_service(&state).sign_up(request).await?;
    info!(profile_id = %response.profile.id, "Sign-up completed");
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /auth/login
#[instrument(name = "sign_in", skip(state, request))]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = auth_service(&state).sign_in(request).await?;
    Ok(Json(response))
}

/// GET /auth/me
#[instrument(skip(state, user), fields(profile_id = %user.profile_id))]
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = auth_service(&state).get_profile(&user.profile_id).await?;
    Ok(Json(profile))
}

/// GET /users (admin)
#[instrument(skip(state))]
pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileResponse>>, AppError> {
    let profiles = auth_service(&state).list_profiles().await?;
    Ok(Json(profiles))
}

/// PUT /users/{id}/role (admin)
#[instrument(skip(state, user, request), fields(admin = %user.profile_id))]
pub async fn set_role(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(profile_id): Path<String>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = auth_service(&state)
        .set_role(&profile_id, request.role)
        .await?;
    info!(profile_id = %profile.id, role = %profile.role, "Role updated via API");
    Ok(Json(profile))
}
