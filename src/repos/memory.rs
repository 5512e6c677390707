//! Map-backed `ProfileRepository` for tests and local runs without Postgres.
//!
//! Mirrors the table semantics: one row per `user_id`, `created_at == updated_at`
//! on insert, `updated_at` refreshed on every update.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::profile_repo::{NewProfile, ProfilePatch, ProfileRepository, ProfileRow};

#[derive(Debug, Default)]
pub struct InMemoryProfileRepo {
    rows: Mutex<HashMap<Uuid, ProfileRow>>,
}

impl InMemoryProfileRepo {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepo {
    async fn create(&self, input: &NewProfile) -> RepoResult<Uuid> {
        let mut rows = self.rows.lock().await;
        if rows.contains_key(&input.user_id) {
            return Err(RepoError::Conflict);
        }

        let now = Utc::now();
        let row = ProfileRow {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            city: input.city.clone(),
            created_at: now,
            updated_at: now,
        };
        let id = row.id;
        rows.insert(input.user_id, row);

        tracing::info!(profile_id = %id, user_id = %input.user_id, "created user profile");
        Ok(id)
    }

    async fn get(&self, user_id: Uuid) -> RepoResult<ProfileRow> {
        self.rows
            .lock()
            .await
            .get(&user_id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn update(&self, user_id: Uuid, patch: &ProfilePatch) -> RepoResult<()> {
        let mut rows = self.rows.lock().await;
        if let Some(row) = rows.get_mut(&user_id) {
            if let Some(v) = &patch.first_name {
                row.first_name = v.clone();
            }
            if let Some(v) = &patch.last_name {
                row.last_name = v.clone();
            }
            if let Some(v) = &patch.city {
                row.city = v.clone();
            }
            row.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, user_id: Uuid) -> RepoResult<()> {
        self.rows
            .lock()
            .await
            .remove(&user_id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann(user_id: Uuid) -> NewProfile {
        NewProfile {
            user_id,
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            city: "Oslo".into(),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_values() {
        let repo = InMemoryProfileRepo::new();
        let user_id = Uuid::new_v4();

        let id = repo.create(&ann(user_id)).await.unwrap();
        let row = repo.get(user_id).await.unwrap();

        assert_eq!(row.id, id);
        assert_eq!(row.user_id, user_id);
        assert_eq!(row.first_name, "Ann");
        assert_eq!(row.last_name, "Lee");
        assert_eq!(row.city, "Oslo");
        assert_eq!(row.created_at, row.updated_at);
    }

    #[tokio::test]
    async fn second_create_for_same_user_conflicts() {
        let repo = InMemoryProfileRepo::new();
        let user_id = Uuid::new_v4();

        repo.create(&ann(user_id)).await.unwrap();
        let err = repo.create(&ann(user_id)).await.unwrap_err();

        assert!(matches!(err, RepoError::Conflict));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn update_touches_only_supplied_fields() {
        let repo = InMemoryProfileRepo::new();
        let user_id = Uuid::new_v4();
        repo.create(&ann(user_id)).await.unwrap();
        let before = repo.get(user_id).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let patch = ProfilePatch {
            city: Some("Bergen".into()),
            ..Default::default()
        };
        repo.update(user_id, &patch).await.unwrap();
        let after = repo.get(user_id).await.unwrap();

        assert_eq!(after.city, "Bergen");
        assert_eq!(after.first_name, before.first_name);
        assert_eq!(after.last_name, before.last_name);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[tokio::test]
    async fn update_without_profile_is_silent() {
        let repo = InMemoryProfileRepo::new();
        let patch = ProfilePatch {
            city: Some("Bergen".into()),
            ..Default::default()
        };

        repo.update(Uuid::new_v4(), &patch).await.unwrap();
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn missing_profile_is_not_found_on_get_and_delete() {
        let repo = InMemoryProfileRepo::new();
        let user_id = Uuid::new_v4();

        assert!(matches!(repo.get(user_id).await, Err(RepoError::NotFound)));
        assert!(matches!(repo.delete(user_id).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn delete_removes_the_profile() {
        let repo = InMemoryProfileRepo::new();
        let user_id = Uuid::new_v4();
        repo.create(&ann(user_id)).await.unwrap();

        repo.delete(user_id).await.unwrap();

        assert!(matches!(repo.get(user_id).await, Err(RepoError::NotFound)));
    }
}
