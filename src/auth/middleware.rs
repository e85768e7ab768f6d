use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::{service::AuthService, types::AuthUser};
use crate::shared::{AppError, AppState};

/// Validates the `Authorization: Bearer` header and stores the caller as an
/// `AuthUser` extension.
/// Usage: .route_layer(middleware::from_fn_with_state(state.clone(), auth::jwt_auth))
#[instrument(skip(state, req, next), fields(uri = %req.uri()))]
pub async fn jwt_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing Authorization header in request");
            AppError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Invalid Authorization header format (expected Bearer token)");
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    let service = AuthService::new(
        Arc::clone(&state.profile_repository),
        Arc::clone(&state.config),
    );
    let user = service.authenticate(token.trim()).await?;

    debug!(profile_id = %user.profile_id, role = %user.role, "Authenticated request");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Rejects callers without the admin role. Must run after `jwt_auth`.
#[instrument(skip(req, next), fields(uri = %req.uri()))]
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req.extensions().get::<AuthUser>().ok_or_else(|| {
        warn!("Admin check reached without an authenticated user");
        AppError::Unauthorized("Authentication required".to_string())
    })?;

    if !user.is_admin() {
        warn!(profile_id = %user.profile_id, role = %user.role, "Admin access denied");
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(req).await)
}
