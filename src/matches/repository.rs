use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::str::FromStr;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::{MatchModel, MatchType};
use crate::shared::AppError;

/// Trait for match repository operations
#[async_trait]
pub trait MatchRepository {
    /// All matches, newest kick-off first
    async fn list_matches(&self) -> Result<Vec<MatchModel>, AppError>;
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchModel>, AppError>;
    async fn create_match(&self, model: &MatchModel) -> Result<(), AppError>;
    async fn update_match(&self, model: &MatchModel) -> Result<(), AppError>;
    async fn delete_match(&self, match_id: &str) -> Result<(), AppError>;
}

/// In-memory implementation of MatchRepository for development and testing.
/// Data is lost when the application restarts.
pub struct InMemoryMatchRepository {
    matches: RwLock<HashMap<String, MatchModel>>,
}

impl Default for InMemoryMatchRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self {
            matches: RwLock::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with pre-populated matches
    pub fn with_matches(matches: Vec<MatchModel>) -> Self {
        let matches = matches
            .into_iter()
            .map(|model| (model.id.clone(), model))
            .collect();
        Self {
            matches: RwLock::new(matches),
        }
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    #[instrument(skip(self))]
    async fn list_matches(&self) -> Result<Vec<MatchModel>, AppError> {
        let mut matches: Vec<_> = self.matches.read().await.values().cloned().collect();
        matches.sort_by_key(|model| (Reverse(model.kickoff()), model.id.clone()));

        debug!(count = matches.len(), "Listed matches from memory");
        Ok(matches)
    }

    #[instrument(skip(self))]
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchModel>, AppError> {
        let model = self.matches.read().await.get(match_id).cloned();
        debug!(match_id = %match_id, found = model.is_some(), "Fetched match from memory");
        Ok(model)
    }

    #[instrument(skip(self, model))]
    async fn create_match(&self, model: &MatchModel) -> Result<(), AppError> {
        let mut matches = self.matches.write().await;
        if matches.contains_key(&model.id) {
            warn!(match_id = %model.id, "Match already exists in memory");
            return Err(AppError::DatabaseError("Match already exists".to_string()));
        }
        matches.insert(model.id.clone(), model.clone());

        debug!(match_id = %model.id, "Match created in memory");
        Ok(())
    }

    #[instrument(skip(self, model))]
    async fn update_match(&self, model: &MatchModel) -> Result<(), AppError> {
        let mut matches = self.matches.write().await;
        if !matches.contains_key(&model.id) {
            warn!(match_id = %model.id, "Match not found for update in memory");
            return Err(AppError::NotFound("Match not found".to_string()));
        }
        matches.insert(model.id.clone(), model.clone());

        debug!(match_id = %model.id, "Match updated in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_match(&self, match_id: &str) -> Result<(), AppError> {
        if self.matches.write().await.remove(match_id).is_none() {
            warn!(match_id = %match_id, "Match not found for deletion in memory");
            return Err(AppError::NotFound("Match not found".to_string()));
        }

        debug!(match_id = %match_id, "Match deleted from memory");
        Ok(())
    }
}

/// PostgreSQL implementation of match repository
pub struct PostgresMatchRepository {
    pool: PgPool,
}

impl PostgresMatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const MATCH_COLUMNS: &str = "id, date, time, home_team, away_team, result, match_type, notes, \
                             created_at, updated_at, created_by";

fn match_from_row(row: &PgRow) -> MatchModel {
    let match_type: Option<String> = row.get("match_type");
    let match_type = match_type.and_then(|raw| match MatchType::from_str(&raw) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(match_type = %raw, "Ignoring unknown match type stored in database");
            None
        }
    });

    MatchModel {
        id: row.get("id"),
        date: row.get("date"),
        time: row.get("time"),
        home_team: row.get("home_team"),
        away_team: row.get("away_team"),
        result: row.get("result"),
        match_type,
        notes: row.get("notes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        created_by: row.get("created_by"),
    }
}

fn database_error(e: sqlx::Error) -> AppError {
    warn!(error = %e, "Match query failed");
    AppError::DatabaseError(e.to_string())
}

#[async_trait]
impl MatchRepository for PostgresMatchRepository {
    #[instrument(skip(self))]
    async fn list_matches(&self) -> Result<Vec<MatchModel>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches ORDER BY date DESC, time DESC, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        debug!(count = rows.len(), "Listed matches from database");
        Ok(rows.iter().map(match_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchModel>, AppError> {
        let row = sqlx::query(&format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1"))
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(row.as_ref().map(match_from_row))
    }

    #[instrument(skip(self, model))]
    async fn create_match(&self, model: &MatchModel) -> Result<(), AppError> {
        sqlx::query(&format!(
            "INSERT INTO matches ({MATCH_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"
        ))
        .bind(&model.id)
        .bind(model.date)
        .bind(model.time)
        .bind(&model.home_team)
        .bind(&model.away_team)
        .bind(&model.result)
        .bind(model.match_type.map(|t| t.to_string()))
        .bind(&model.notes)
        .bind(model.created_at)
        .bind(model.updated_at)
        .bind(&model.created_by)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        debug!(match_id = %model.id, "Match created in database");
        Ok(())
    }

    #[instrument(skip(self, model))]
    async fn update_match(&self, model: &MatchModel) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE matches SET date = $2, time = $3, home_team = $4, away_team = $5, \
             result = $6, match_type = $7, notes = $8, updated_at = $9 WHERE id = $1",
        )
        .bind(&model.id)
        .bind(model.date)
        .bind(model.time)
        .bind(&model.home_team)
        .bind(&model.away_team)
        .bind(&model.result)
        .bind(model.match_type.map(|t| t.to_string()))
        .bind(&model.notes)
        .bind(model.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            warn!(match_id = %model.id, "Match not found for update in database");
            return Err(AppError::NotFound("Match not found".to_string()));
        }

        debug!(match_id = %model.id, "Match updated in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_match(&self, match_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(match_id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            warn!(match_id = %match_id, "Match not found for deletion in database");
            return Err(AppError::NotFound("Match not found".to_string()));
        }

        debug!(match_id = %match_id, "Match deleted from database");
        Ok(())
    }
}
