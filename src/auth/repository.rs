use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use std::str::FromStr;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::{ProfileModel, Role};
use crate::shared::AppError;

/// Trait for profile repository operations
#[async_trait]
pub trait ProfileRepository {
    /// Fails with `Conflict` when the e-mail is already registered
    async fn create_profile(&self, profile: &ProfileModel) -> Result<(), AppError>;
    async fn get_profile(&self, profile_id: &str) -> Result<Option<ProfileModel>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<ProfileModel>, AppError>;
    async fn update_role(&self, profile_id: &str, role: Role) -> Result<ProfileModel, AppError>;
    async fn list_profiles(&self) -> Result<Vec<ProfileModel>, AppError>;
}

/// In-memory implementation of ProfileRepository for development and testing
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<String, ProfileModel>>,
}

impl Default for InMemoryProfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    #[instrument(skip(self, profile), fields(email = %profile.email))]
    async fn create_profile(&self, profile: &ProfileModel) -> Result<(), AppError> {
        let mut profiles = self.profiles.write().await;
        if profiles.values().any(|p| p.email == profile.email) {
            warn!("E-mail already registered in memory");
            return Err(AppError::Conflict("E-mail already registered".to_string()));
        }
        profiles.insert(profile.id.clone(), profile.clone());

        debug!(profile_id = %profile.id, "Profile created in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, profile_id: &str) -> Result<Option<ProfileModel>, AppError> {
        Ok(self.profiles.read().await.get(profile_id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<ProfileModel>, AppError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.values().find(|p| p.email == email).cloned())
    }

    #[instrument(skip(self))]
    async fn update_role(&self, profile_id: &str, role: Role) -> Result<ProfileModel, AppError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles.get_mut(profile_id).ok_or_else(|| {
            warn!(profile_id = %profile_id, "Profile not found for role update in memory");
            AppError::NotFound("Profile not found".to_string())
        })?;
        profile.role = role;

        debug!(profile_id = %profile_id, role = %role, "Profile role updated in memory");
        Ok(profile.clone())
    }

    #[instrument(skip(self))]
    async fn list_profiles(&self) -> Result<Vec<ProfileModel>, AppError> {
        let mut profiles: Vec<_> = self.profiles.read().await.values().cloned().collect();
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.email.cmp(&b.email)));
        Ok(profiles)
    }
}

/// PostgreSQL implementation of profile repository
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PROFILE_COLUMNS: &str = "id, email, full_name, role, password_hash, created_at";

fn profile_from_row(row: &PgRow) -> Result<ProfileModel, AppError> {
    let role: String = row.get("role");
    let role = Role::from_str(&role).map_err(|_| {
        warn!(role = %role, "Unknown role stored in database");
        AppError::DatabaseError(format!("Unknown role: {}", role))
    })?;

    Ok(ProfileModel {
        id: row.get("id"),
        email: row.get("email"),
        full_name: row.get("full_name"),
        role,
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    })
}

fn database_error(e: sqlx::Error) -> AppError {
    warn!(error = %e, "Profile query failed");
    AppError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    #[instrument(skip(self, profile), fields(email = %profile.email))]
    async fn create_profile(&self, profile: &ProfileModel) -> Result<(), AppError> {
        let result = sqlx::query(&format!(
            "INSERT INTO profiles ({PROFILE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)"
        ))
        .bind(&profile.id)
        .bind(&profile.email)
        .bind(&profile.full_name)
        .bind(profile.role.to_string())
        .bind(&profile.password_hash)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!(profile_id = %profile.id, "Profile created in database");
                Ok(())
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                warn!("E-mail already registered in database");
                Err(AppError::Conflict("E-mail already registered".to_string()))
            }
            Err(e) => Err(database_error(e)),
        }
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, profile_id: &str) -> Result<Option<ProfileModel>, AppError> {
        let row = sqlx::query(&format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"))
            .bind(profile_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(profile_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<ProfileModel>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(profile_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn update_role(&self, profile_id: &str, role: Role) -> Result<ProfileModel, AppError> {
        let row = sqlx::query(&format!(
            "UPDATE profiles SET role = $2 WHERE id = $1 RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(profile_id)
        .bind(role.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(row) => profile_from_row(&row),
            None => {
                warn!(profile_id = %profile_id, "Profile not found for role update in database");
                Err(AppError::NotFound("Profile not found".to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_profiles(&self) -> Result<Vec<ProfileModel>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at, email"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(profile_from_row).collect()
    }
}
