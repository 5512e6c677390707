/*
 * Responsibility
 * - user_profiles table access (CRUD) behind the ProfileRepository trait
 * - Classify DB failures into RepoError before returning
 * - One profile per user_id is enforced by the table's unique constraint, not here
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for `create`. `user_id` always comes from the verified identity.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
}

/// Fields to change in `update`. `None` leaves the column as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.city.is_none()
    }
}

/// Profile persistence.
///
/// Implementations must report a duplicate `user_id` on `create` as
/// `RepoError::Conflict`, and a missing row on `get`/`delete` as `RepoError::NotFound`.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn create(&self, input: &NewProfile) -> RepoResult<Uuid>;

    async fn get(&self, user_id: Uuid) -> RepoResult<ProfileRow>;

    /// Applies `patch` and refreshes `updated_at`. Existence is not checked first;
    /// an update for a user without a profile changes nothing.
    async fn update(&self, user_id: Uuid, patch: &ProfilePatch) -> RepoResult<()>;

    /// Removes the profile. Fails with `NotFound` when there is nothing to remove.
    async fn delete(&self, user_id: Uuid) -> RepoResult<()>;
}

#[derive(Clone, Debug)]
pub struct PgProfileRepo {
    pool: PgPool,
}

impl PgProfileRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepo {
    async fn create(&self, input: &NewProfile) -> RepoResult<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO user_profiles (user_id, first_name, last_name, city)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(input.user_id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.city)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let err = RepoError::from_insert(e);
            if let RepoError::CreateFailed(source) = &err {
                tracing::error!(
                    user_id = %input.user_id,
                    error = %source,
                    "failed to insert user profile"
                );
            }
            err
        })?;

        tracing::info!(profile_id = %id, user_id = %input.user_id, "created user profile");
        Ok(id)
    }

    async fn get(&self, user_id: Uuid) -> RepoResult<ProfileRow> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, user_id, first_name, last_name, city, created_at, updated_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            // Callers cannot act differently on a failed read, so it reads as absent.
            tracing::error!(user_id = %user_id, error = %e, "failed to read user profile");
            RepoError::NotFound
        })?;

        row.ok_or(RepoError::NotFound)
    }

    async fn update(&self, user_id: Uuid, patch: &ProfilePatch) -> RepoResult<()> {
        // NULL binds keep the current value, so one statement covers every subset.
        sqlx::query(
            r#"
            UPDATE user_profiles
            SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                city = COALESCE($4, city),
                updated_at = now()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(patch.first_name.as_deref())
        .bind(patch.last_name.as_deref())
        .bind(patch.city.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "failed to update user profile");
            RepoError::UpdateFailed(e)
        })?;

        Ok(())
    }

    async fn delete(&self, user_id: Uuid) -> RepoResult<()> {
        self.get(user_id).await?;

        let result = sqlx::query(
            r#"
            DELETE FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "failed to delete user profile");
            RepoError::DeleteFailed(e)
        })?;

        // Someone else deleted it between the read and the delete.
        if result.rows_affected() == 0 {
            tracing::warn!(user_id = %user_id, "user profile vanished before delete");
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
