use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::PerformanceModel;
use crate::shared::AppError;

/// Trait for performance repository operations
#[async_trait]
pub trait PerformanceRepository {
    async fn list_performances(&self) -> Result<Vec<PerformanceModel>, AppError>;
    async fn list_for_match(&self, match_id: &str) -> Result<Vec<PerformanceModel>, AppError>;
    async fn create_performances(&self, rows: &[PerformanceModel]) -> Result<(), AppError>;

    /// Removes every row of a match and returns how many were deleted
    async fn delete_for_match(&self, match_id: &str) -> Result<u64, AppError>;
}

/// In-memory implementation of PerformanceRepository for development and testing
pub struct InMemoryPerformanceRepository {
    rows: RwLock<HashMap<String, PerformanceModel>>,
}

impl Default for InMemoryPerformanceRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPerformanceRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_performances(rows: Vec<PerformanceModel>) -> Self {
        let rows = rows.into_iter().map(|row| (row.id.clone(), row)).collect();
        Self {
            rows: RwLock::new(rows),
        }
    }
}

fn insertion_order(rows: &mut [PerformanceModel]) {
    rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl PerformanceRepository for InMemoryPerformanceRepository {
    #[instrument(skip(self))]
    async fn list_performances(&self) -> Result<Vec<PerformanceModel>, AppError> {
        let mut rows: Vec<_> = self.rows.read().await.values().cloned().collect();
        insertion_order(&mut rows);

        debug!(count = rows.len(), "Listed performances from memory");
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn list_for_match(&self, match_id: &str) -> Result<Vec<PerformanceModel>, AppError> {
        let mut rows: Vec<_> = self
            .rows
            .read()
            .await
            .values()
            .filter(|row| row.match_id == match_id)
            .cloned()
            .collect();
        insertion_order(&mut rows);

        debug!(match_id = %match_id, count = rows.len(), "Listed match performances from memory");
        Ok(rows)
    }

    #[instrument(skip(self, rows))]
    async fn create_performances(&self, rows: &[PerformanceModel]) -> Result<(), AppError> {
        let mut stored = self.rows.write().await;
        if let Some(existing) = rows.iter().find(|row| stored.contains_key(&row.id)) {
            warn!(performance_id = %existing.id, "Performance already exists in memory");
            return Err(AppError::DatabaseError(
                "Performance already exists".to_string(),
            ));
        }

        for row in rows {
            stored.insert(row.id.clone(), row.clone());
        }

        debug!(count = rows.len(), "Performances created in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_for_match(&self, match_id: &str) -> Result<u64, AppError> {
        let mut stored = self.rows.write().await;
        let before = stored.len();
        stored.retain(|_, row| row.match_id != match_id);
        let removed = (before - stored.len()) as u64;

        debug!(match_id = %match_id, removed, "Match performances deleted from memory");
        Ok(removed)
    }
}

/// PostgreSQL implementation of performance repository
pub struct PostgresPerformanceRepository {
    pool: PgPool,
}

impl PostgresPerformanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PERFORMANCE_COLUMNS: &str =
    "id, match_id, player_name, present, goals, penalties, corners, created_at";

fn performance_from_row(row: &PgRow) -> PerformanceModel {
    PerformanceModel {
        id: row.get("id"),
        match_id: row.get("match_id"),
        player_name: row.get("player_name"),
        present: row.get("present"),
        goals: count_column(row, "goals"),
        penalties: count_column(row, "penalties"),
        corners: count_column(row, "corners"),
        created_at: row.get("created_at"),
    }
}

// Columns carry a CHECK (>= 0) constraint
fn count_column(row: &PgRow, column: &str) -> u32 {
    let value: i32 = row.get(column);
    value.max(0) as u32
}

fn count_param(value: u32) -> Result<i32, AppError> {
    i32::try_from(value)
        .map_err(|_| AppError::Validation(format!("Count {} is out of range", value)))
}

fn database_error(e: sqlx::Error) -> AppError {
    warn!(error = %e, "Performance query failed");
    AppError::DatabaseError(e.to_string())
}

#[async_trait]
impl PerformanceRepository for PostgresPerformanceRepository {
    #[instrument(skip(self))]
    async fn list_performances(&self) -> Result<Vec<PerformanceModel>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {PERFORMANCE_COLUMNS} FROM player_performances ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        debug!(count = rows.len(), "Listed performances from database");
        Ok(rows.iter().map(performance_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn list_for_match(&self, match_id: &str) -> Result<Vec<PerformanceModel>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {PERFORMANCE_COLUMNS} FROM player_performances \
             WHERE match_id = $1 ORDER BY created_at, id"
        ))
        .bind(match_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.iter().map(performance_from_row).collect())
    }

    #[instrument(skip(self, rows))]
    async fn create_performances(&self, rows: &[PerformanceModel]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        for row in rows {
            sqlx::query(
                "INSERT INTO player_performances \
                 (id, match_id, player_name, present, goals, penalties, corners, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(&row.id)
            .bind(&row.match_id)
            .bind(&row.player_name)
            .bind(row.present)
            .bind(count_param(row.goals)?)
            .bind(count_param(row.penalties)?)
            .bind(count_param(row.corners)?)
            .bind(row.created_at)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;
        }

        tx.commit().await.map_err(database_error)?;

        debug!(count = rows.len(), "Performances created in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_for_match(&self, match_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM player_performances WHERE match_id = $1")
            .bind(match_id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        debug!(match_id = %match_id, removed = result.rows_affected(), "Match performances deleted");
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::models::PlayerEntry;

    fn entry(name: &str, goals: u32) -> PlayerEntry {
        PlayerEntry {
            name: name.to_string(),
            present: true,
            goals,
            penalties: 0,
            corners: 0,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_for_match() {
        let repo = InMemoryPerformanceRepository::new();
        let rows = vec![
            PerformanceModel::new("match-1", &entry("Arne", 2)),
            PerformanceModel::new("match-2", &entry("Brian", 1)),
        ];

        repo.create_performances(&rows).await.unwrap();

        assert_eq!(repo.list_performances().await.unwrap().len(), 2);
        let first = repo.list_for_match("match-1").await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].player_name, "Arne");
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let row = PerformanceModel::new("match-1", &entry("Arne", 2));
        let repo = InMemoryPerformanceRepository::with_performances(vec![row.clone()]);

        let result = repo.create_performances(&[row]).await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_delete_for_match_only_touches_that_match() {
        let repo = InMemoryPerformanceRepository::with_performances(vec![
            PerformanceModel::new("match-1", &entry("Arne", 2)),
            PerformanceModel::new("match-1", &entry("Brian", 0)),
            PerformanceModel::new("match-2", &entry("Mats", 1)),
        ]);

        assert_eq!(repo.delete_for_match("match-1").await.unwrap(), 2);
        assert_eq!(repo.delete_for_match("match-1").await.unwrap(), 0);

        let remaining = repo.list_performances().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].match_id, "match-2");
    }

    #[test]
    fn test_count_param_rejects_values_beyond_integer_column() {
        assert_eq!(count_param(42).unwrap(), 42);
        assert_eq!(count_param(i32::MAX as u32).unwrap(), i32::MAX);
        assert!(matches!(
            count_param(u32::MAX),
            Err(AppError::Validation(_))
        ));
    }
}
