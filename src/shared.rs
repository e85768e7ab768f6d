use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;

use crate::auth::repository::{
    InMemoryProfileRepository, PostgresProfileRepository, ProfileRepository,
};
use crate::config::AppConfig;
use crate::matches::repository::{
    InMemoryMatchRepository, MatchRepository, PostgresMatchRepository,
};
use crate::performance::repository::{
    InMemoryPerformanceRepository, PerformanceRepository, PostgresPerformanceRepository,
};
use crate::stats::StatsError;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
    pub match_repository: Arc<dyn MatchRepository + Send + Sync>,
    pub performance_repository: Arc<dyn PerformanceRepository + Send + Sync>,
}

impl AppState {
    pub fn new(
        config: Arc<AppConfig>,
        profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
        match_repository: Arc<dyn MatchRepository + Send + Sync>,
        performance_repository: Arc<dyn PerformanceRepository + Send + Sync>,
    ) -> Self {
        Self {
            config,
            profile_repository,
            match_repository,
            performance_repository,
        }
    }

    /// State backed by in-memory repositories; data is lost on restart
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(
            Arc::new(config),
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(InMemoryMatchRepository::new()),
            Arc::new(InMemoryPerformanceRepository::new()),
        )
    }

    /// State backed by PostgreSQL repositories sharing one pool
    pub fn postgres(config: AppConfig, pool: PgPool) -> Self {
        Self::new(
            Arc::new(config),
            Arc::new(PostgresProfileRepository::new(pool.clone())),
            Arc::new(PostgresMatchRepository::new(pool.clone())),
            Arc::new(PostgresPerformanceRepository::new(pool)),
        )
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JWT error: {0}")]
    JwtError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl From<StatsError> for AppError {
    fn from(error: StatsError) -> Self {
        AppError::Validation(error.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::JwtError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
